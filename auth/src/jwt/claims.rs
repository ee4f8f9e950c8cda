use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an access token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    pub user_id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with user_id, iat = now and exp = now + lifetime
    pub fn for_user(user_id: i64, lifetime: Duration) -> Self {
        Self::issued_at(user_id, Utc::now(), lifetime)
    }

    /// Create claims for a user issued at a fixed instant.
    pub fn issued_at(user_id: i64, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            user_id,
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(42, Duration::hours(24));

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_issued_at() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let claims = Claims::issued_at(7, issued, Duration::hours(1));

        assert_eq!(claims.iat, issued.timestamp());
        assert_eq!(claims.exp, issued.timestamp() + 3600);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            user_id: 1,
            exp: 1000,
            iat: 0,
        };

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_serialized_field_names() {
        let claims = Claims {
            user_id: 5,
            exp: 20,
            iat: 10,
        };

        let value = serde_json::to_value(claims).unwrap();
        assert_eq!(value, serde_json::json!({"user_id": 5, "exp": 20, "iat": 10}));
    }
}
