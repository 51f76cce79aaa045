#![allow(dead_code)]

use anyhow::Result;
use std::{net::TcpListener, sync::Arc};
use tavola::{
    session::Session,
    storage::SharedStore,
    ApiClient, ApiConfig, Feedback, History, MemoryStore, ToastContainer,
};

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub struct Harness {
    pub store: SharedStore,
    pub session: Session,
    pub history: History,
    pub toasts: ToastContainer,
}

impl Harness {
    pub fn new(base_url: &str) -> Result<Self> {
        let store = MemoryStore::shared();
        let api = ApiClient::new(ApiConfig::new(base_url)?, Arc::clone(&store))?;
        let history = History::new();
        let toasts = ToastContainer::new();
        let feedback = Feedback::new(Arc::new(toasts.clone()), Arc::new(history.clone()));

        Ok(Self {
            session: Session::new(Arc::clone(&store), api, feedback),
            store,
            history,
            toasts,
        })
    }
}
