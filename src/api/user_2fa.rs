//
//  iam-api
//  api/user_2fa.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Two-factor authentication settings of a single user.
//!
//! Unlike the other resource ops, [`User2faOp`] is bound to one user at
//! construction, so none of its methods take a user id:
//!
//! ```rust,no_run
//! use iam_api::api::user::{UserApi, UserOp};
//! use iam_api::api::user_2fa::{User2faApi, User2faOp};
//! use iam_api::IamClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IamClient::new()?;
//! let user = UserOp::new(&client).read(77).await?;
//!
//! let twofa = User2faOp::new(&client, &user);
//! let otp = twofa.activate_otp().await?;
//! println!("scan {} (period {}s)", otp.secret, otp.period_sec);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Page, Result};
use crate::api::user::User;

/// OTP seed returned when activating one-time passwords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpActivation {
    pub secret: String,

    pub period_sec: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedDevice {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A registered WebAuthn security key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityKey {
    pub id: i64,

    pub name: String,

    pub registered_at: DateTime<Utc>,

    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RecoveryCode {
    code: String,
}

#[derive(Debug, Deserialize)]
struct RegistrationOptions {
    public_key_credential_creation_options: String,
}

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    credential: &'a str,
}

#[derive(Debug, Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[async_trait]
pub trait User2faApi: Send + Sync {
    async fn activate_otp(&self) -> Result<OtpActivation>;
    async fn deactivate_otp(&self) -> Result<()>;

    /// Issues a new recovery code, invalidating the previous one.
    async fn create_recovery_code(&self) -> Result<String>;

    async fn list_trusted_devices(&self) -> Result<Page<TrustedDevice>>;
    async fn delete_trusted_device(&self, device_id: i64) -> Result<()>;
    async fn clear_trusted_devices(&self) -> Result<()>;

    /// Returns the WebAuthn credential creation options, JSON encoded, to
    /// hand to the browser.
    async fn start_security_key_registration(&self) -> Result<String>;

    /// Completes a registration with the credential produced by the browser.
    async fn validate_security_key_registration(&self, credential: &str) -> Result<()>;

    async fn list_security_keys(&self) -> Result<Page<SecurityKey>>;
    async fn read_security_key(&self, key_id: i64) -> Result<SecurityKey>;
    async fn update_security_key(&self, key_id: i64, name: &str) -> Result<SecurityKey>;
    async fn delete_security_key(&self, key_id: i64) -> Result<()>;
}

pub struct User2faOp<'a> {
    client: &'a IamClient,
    user_id: i64,
}

impl<'a> User2faOp<'a> {
    pub fn new(client: &'a IamClient, user: &User) -> Self {
        Self {
            client,
            user_id: user.id,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    fn path(&self, suffix: &str) -> String {
        format!("/compat/users/{}/{}", self.user_id, suffix)
    }
}

#[async_trait]
impl User2faApi for User2faOp<'_> {
    async fn activate_otp(&self) -> Result<OtpActivation> {
        error_from_decoded_response(
            "User2fa.ActivateOtp",
            self.client.post_empty(&self.path("activate-otp")),
        )
        .await
    }

    async fn deactivate_otp(&self) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User2fa.DeactivateOtp",
            self.client.post_empty(&self.path("deactivate-otp")),
        )
        .await?;
        Ok(())
    }

    async fn create_recovery_code(&self) -> Result<String> {
        let response: RecoveryCode = error_from_decoded_response(
            "User2fa.CreateRecoveryCode",
            self.client.post_empty(&self.path("recovery-code")),
        )
        .await?;
        Ok(response.code)
    }

    async fn list_trusted_devices(&self) -> Result<Page<TrustedDevice>> {
        error_from_decoded_response(
            "User2fa.ListTrustedDevices",
            self.client.get(&self.path("trusted-devices")),
        )
        .await
    }

    async fn delete_trusted_device(&self, device_id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User2fa.DeleteTrustedDevice",
            self.client
                .delete(&self.path(&format!("trusted-devices/{}", device_id))),
        )
        .await?;
        Ok(())
    }

    async fn clear_trusted_devices(&self) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User2fa.ClearTrustedDevices",
            self.client.post_empty(&self.path("clear-trusted-devices")),
        )
        .await?;
        Ok(())
    }

    async fn start_security_key_registration(&self) -> Result<String> {
        let response: RegistrationOptions = error_from_decoded_response(
            "User2fa.StartSecurityKeyRegistration",
            self.client
                .post_empty(&self.path("start-security-key-registration")),
        )
        .await?;
        Ok(response.public_key_credential_creation_options)
    }

    async fn validate_security_key_registration(&self, credential: &str) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User2fa.ValidateSecurityKeyRegistration",
            self.client.post(
                &self.path("validate-security-key-registration"),
                &CredentialRequest { credential },
            ),
        )
        .await?;
        Ok(())
    }

    async fn list_security_keys(&self) -> Result<Page<SecurityKey>> {
        error_from_decoded_response(
            "User2fa.ListSecurityKeys",
            self.client.get(&self.path("security-keys")),
        )
        .await
    }

    async fn read_security_key(&self, key_id: i64) -> Result<SecurityKey> {
        error_from_decoded_response(
            "User2fa.ReadSecurityKey",
            self.client
                .get(&self.path(&format!("security-keys/{}", key_id))),
        )
        .await
    }

    async fn update_security_key(&self, key_id: i64, name: &str) -> Result<SecurityKey> {
        error_from_decoded_response(
            "User2fa.UpdateSecurityKey",
            self.client.put(
                &self.path(&format!("security-keys/{}", key_id)),
                &NameRequest { name },
            ),
        )
        .await
    }

    async fn delete_security_key(&self, key_id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User2fa.DeleteSecurityKey",
            self.client
                .delete(&self.path(&format!("security-keys/{}", key_id))),
        )
        .await?;
        Ok(())
    }
}
