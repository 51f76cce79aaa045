//! User records cached in client storage. These carry navigation metadata only; the
//! token lives under its own key and never appears here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{convert::Infallible, fmt, str::FromStr};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Owner,
    Admin,
    Customer,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            "customer" => Role::Customer,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(value.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Profile block of a user: role and where that role lands after sign-in. These two
/// are the only fields that must be well-formed; everything else (phone, avatar, role
/// flags) is carried through `extra` untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    /// Fields this client does not interpret, kept so a rewrite is lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque server identifier, numeric or string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display-only text: anything that is not a string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl User {
    /// The profile role, treating an empty role as absent.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.profile
            .as_ref()
            .and_then(|profile| profile.role.as_ref())
            .filter(|role| !role.as_str().is_empty())
    }

    #[must_use]
    pub fn dashboard_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|profile| profile.dashboard_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_round_trips_known_and_unknown_names() {
        let roles: Vec<Role> = serde_json::from_value(json!(["owner", "admin", "chef"])).unwrap();
        assert_eq!(
            roles,
            vec![Role::Owner, Role::Admin, Role::Other("chef".to_string())]
        );
        assert_eq!(
            serde_json::to_value(&roles).unwrap(),
            json!(["owner", "admin", "chef"])
        );
    }

    #[test]
    fn user_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "username": "ana",
            "email": "ana@bistro.dev",
            "profile": {
                "role": "owner",
                "dashboard_url": "/owner-dashboard/",
                "is_owner": true,
                "restaurant_id": 3
            },
            "date_joined": "2024-03-05"
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.role(), Some(&Role::Owner));
        assert_eq!(user.dashboard_url(), Some("/owner-dashboard/"));
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn loosely_typed_fields_do_not_reject_the_user() {
        let user: User = serde_json::from_value(json!({
            "id": "u-7",
            "username": 42,
            "profile": {
                "role": "owner",
                "dashboard_url": "/o/",
                "phone": 5550102030_u64,
                "is_owner": "yes"
            }
        }))
        .unwrap();

        assert_eq!(user.id, Some(json!("u-7")));
        assert_eq!(user.username, None);
        assert_eq!(user.role(), Some(&Role::Owner));
        assert_eq!(user.dashboard_url(), Some("/o/"));

        let profile = user.profile.unwrap();
        assert_eq!(profile.extra.get("is_owner"), Some(&json!("yes")));
        assert_eq!(profile.extra.get("phone"), Some(&json!(5_550_102_030_u64)));
    }

    #[test]
    fn empty_role_and_dashboard_are_absent() {
        let user: User = serde_json::from_value(json!({
            "profile": {"role": "", "dashboard_url": ""}
        }))
        .unwrap();
        assert_eq!(user.role(), None);
        assert_eq!(user.dashboard_url(), None);
    }
}
