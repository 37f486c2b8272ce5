use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use super::test_app::TestApp;

/// A member known to the mock members API, with a token the app accepts.
pub struct SeededMember {
    pub id: String,
    pub email: String,
    pub access_token: String,
}

/// Member payload with containers only; every leaf is missing.
pub fn empty_member(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@swimbuddz.test"),
        "membership": {},
        "profile": {},
        "emergency_contact": {},
        "availability": {}
    })
}

/// Member payload with every profile, safety and availability field set and
/// no tier paid.
pub fn complete_member(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@swimbuddz.test"),
        "first_name": "Ada",
        "last_name": "Obi",
        "membership": {
            "active_tiers": [],
            "requested_tiers": [],
            "community_paid_until": null,
            "club_paid_until": null,
            "academy_paid_until": null
        },
        "profile": {
            "photo_media_id": "media-42",
            "gender": "female",
            "date_of_birth": "1994-05-17",
            "phone": "+2348012345678",
            "country": "Nigeria",
            "city": "Lagos",
            "time_zone": "Africa/Lagos",
            "swim_level": "beginner",
            "deep_water_comfort": "nervous",
            "personal_goals": "Swim a full length without stopping"
        },
        "emergency_contact": {
            "name": "Tunde Obi",
            "relationship": "brother",
            "phone": "+2348098765432"
        },
        "availability": {
            "preferred_locations": ["yaba"],
            "preferred_times": ["weekend_morning"],
            "available_days": ["saturday"]
        }
    })
}

/// RFC 3339 timestamp `days` from now.
pub fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

impl TestApp {
    /// Mint a token signed with the app's JWT secret.
    pub fn token_for(&self, sub: &str, email: &str) -> String {
        let claims = json!({
            "sub": sub,
            "email": email,
            "aud": "authenticated",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt.secret.as_bytes()),
        )
        .expect("Failed to sign test token")
    }

    /// Register `member` with the mock members API and return a token for it.
    /// The token subject is the auth provider's user id, which differs from
    /// the member record id.
    pub fn seed_member(&self, member: Value) -> SeededMember {
        let subject = format!("auth|{}", member["id"].as_str().unwrap_or_default());
        self.seed_member_as(member, &subject)
    }

    /// Like `seed_member`, with an explicit token subject.
    pub fn seed_member_as(&self, member: Value, subject: &str) -> SeededMember {
        let id = member["id"].as_str().unwrap_or_default().to_string();
        let email = member["email"].as_str().unwrap_or_default().to_string();
        let access_token = self.token_for(subject, &email);
        self.backend.set_member(&access_token, member);

        SeededMember {
            id,
            email,
            access_token,
        }
    }

    /// Create an authenticated request with the given token.
    pub fn auth_get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_put(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    /// Store a community checkout for the member through the API.
    pub async fn save_community_intent(&self, token: &str) -> Value {
        let resp = self
            .auth_put("/api/members/me/payment-intent", token)
            .json(&json!({
                "purpose": "community_annual",
                "reference": "SBZ-REF-001",
                "checkout_url": "https://checkout.paystack.com/sbz-ref-001",
            }))
            .send()
            .await
            .expect("Save payment intent failed");

        assert!(
            resp.status().is_success(),
            "Save payment intent failed: {}",
            resp.text().await.unwrap_or_default()
        );
        resp.json().await.expect("Failed to parse payment intent")
    }
}
