//! Claim page state and the claim action.
//!
//! The page is in exactly one of three states: a signed-in placeholder, the
//! already-claimed notice, or the claim flow. The claim flow moves from
//! collecting the email to collecting the code after a code was sent, and
//! never back.

use crate::client::{VerificationClient, VerificationOutcome};
use crate::messages::Messages;
use crate::providers::Session;
use crate::validate::is_valid_input;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Which view the page shows
#[derive(Debug)]
pub enum PageState {
    /// A session exists. Sign-in wiring is external, so the view is empty.
    Authenticated,
    /// Already claimed within the current window
    Claimed { first_claim: bool },
    /// Still eligible; the claim form is shown
    Unclaimed(ClaimFlow),
}

impl PageState {
    /// Select the view from the server-supplied session and claim status
    pub fn resolve(session: Option<&Session>, claimed: bool, prefilled_address: &str) -> Self {
        if session.is_some() {
            PageState::Authenticated
        } else if claimed {
            PageState::Claimed { first_claim: false }
        } else {
            PageState::Unclaimed(ClaimFlow::new(prefilled_address))
        }
    }
}

/// Stage of the verification flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    CollectingEmail,
    CollectingCode { code: String },
}

/// Loading indicator shared with whoever renders the button.
///
/// Only set while a [`LoadingGuard`] is alive.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped
    pub fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.0.clone())
    }
}

/// Clears the loading flag on drop
#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// What the action button says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    EnterAddress,
    InvalidAddress,
    NotAllowed,
    RequestCode,
    Verify,
    Processing,
    AlreadyClaimed,
}

impl ButtonLabel {
    pub fn text(&self, messages: &Messages) -> &'static str {
        match self {
            ButtonLabel::EnterAddress => messages.button_enter_address,
            ButtonLabel::InvalidAddress => messages.button_invalid_address,
            ButtonLabel::NotAllowed => messages.button_not_allowed,
            ButtonLabel::RequestCode => messages.button_request_code,
            ButtonLabel::Verify => messages.button_verify,
            ButtonLabel::Processing => messages.button_processing,
            ButtonLabel::AlreadyClaimed => messages.button_already_claimed,
        }
    }
}

/// Rendered state of the action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: ButtonLabel,
    pub enabled: bool,
}

impl Button {
    fn disabled(label: ButtonLabel) -> Self {
        Self { label, enabled: false }
    }
}

/// Toast shown after a claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CodeSent,
    CodeSendFailed,
    TokenIssued,
    CodeIncorrect,
    NetworkError,
}

impl Notice {
    pub fn text(&self, messages: &Messages) -> &'static str {
        match self {
            Notice::CodeSent => messages.code_sent,
            Notice::CodeSendFailed => messages.code_send_failed,
            Notice::TokenIssued => messages.token_issued,
            Notice::CodeIncorrect => messages.code_incorrect,
            Notice::NetworkError => messages.network_error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::CodeSent | Notice::TokenIssued)
    }
}

/// The email/code form
#[derive(Debug)]
pub struct ClaimFlow {
    address: String,
    stage: Stage,
    consent: bool,
    loading: LoadingFlag,
}

impl ClaimFlow {
    /// Fresh flow collecting the email, consent checked
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            stage: Stage::CollectingEmail,
            consent: true,
            loading: LoadingFlag::default(),
        }
    }

    /// Rebuild a flow from submitted form values
    pub fn restore(address: impl Into<String>, stage: Stage, consent: bool) -> Self {
        Self {
            address: address.into(),
            stage,
            consent,
            loading: LoadingFlag::default(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    #[cfg(test)]
    fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Evaluate the action button: address validity first, then consent,
    /// then stage and loading.
    pub fn button(&self) -> Button {
        if !is_valid_input(&self.address) {
            let label = if self.address.is_empty() {
                ButtonLabel::EnterAddress
            } else {
                ButtonLabel::InvalidAddress
            };
            return Button::disabled(label);
        }

        if !self.consent {
            return Button::disabled(ButtonLabel::NotAllowed);
        }

        if self.is_loading() {
            return Button::disabled(ButtonLabel::Processing);
        }

        Button {
            label: self.ready_label(),
            enabled: true,
        }
    }

    /// Label of the enabled button in the current stage
    pub fn ready_label(&self) -> ButtonLabel {
        match self.stage {
            Stage::CollectingEmail => ButtonLabel::RequestCode,
            Stage::CollectingCode { .. } => ButtonLabel::Verify,
        }
    }

    /// Press the action button.
    ///
    /// Returns `None` without calling anything when the button is disabled.
    /// Otherwise runs one verification call and returns exactly one notice.
    /// Failures leave the stage unchanged so the user can press again.
    pub async fn process_claim(&mut self, client: &dyn VerificationClient) -> Option<Notice> {
        if !self.button().enabled {
            return None;
        }

        let _loading = self.loading.begin();

        let pending_code = match &self.stage {
            Stage::CollectingEmail => None,
            Stage::CollectingCode { code } => Some(code.clone()),
        };

        let notice = match pending_code {
            None => match client.send_code(&self.address).await {
                Ok(VerificationOutcome::Accepted) => {
                    info!("Verification code sent to {}", self.address);
                    self.stage = Stage::CollectingCode { code: String::new() };
                    Notice::CodeSent
                }
                Ok(VerificationOutcome::Rejected { status }) => {
                    warn!(
                        "Sending verification code to {} rejected (status {:?})",
                        self.address, status
                    );
                    Notice::CodeSendFailed
                }
                Err(e) => {
                    error!("Sending verification code to {} failed: {}", self.address, e);
                    Notice::NetworkError
                }
            },
            Some(code) => match client.verify_code(&self.address, &code).await {
                Ok(VerificationOutcome::Accepted) => {
                    info!("Verification code accepted for {}", self.address);
                    Notice::TokenIssued
                }
                Ok(VerificationOutcome::Rejected { status }) => {
                    warn!(
                        "Verification code for {} rejected (status {:?})",
                        self.address, status
                    );
                    Notice::CodeIncorrect
                }
                Err(e) => {
                    error!("Verifying code for {} failed: {}", self.address, e);
                    Notice::NetworkError
                }
            },
        };

        Some(notice)
    }
}
