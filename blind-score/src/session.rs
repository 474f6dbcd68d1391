//! # Session
//!
//! Owns the per-session key pair and drives one scoring request from answer text to
//! [`ScoreReport`]. The network hop sits between [`Session::prepare`] and
//! [`PendingScore::finish`]: the caller ships [`PendingScore::request`] to an aggregator and
//! hands the reply back.
//!
//! ```
//! # use blind_score::errors::BlindScoreError;
//! # use blind_score::keypair::KeyPair;
//! # use blind_score::policy::ScoringPolicy;
//! # use blind_score::preset::lexicon::Lexicon;
//! # use blind_score::protocol::aggregate;
//! # use blind_score::session::{Prepared, Session};
//! # fn main() -> Result<(), BlindScoreError> {
//! let mut session = Session::new(Lexicon::default());
//! session.install(KeyPair::generate(256))?;
//!
//! let report = match session.prepare("저는 팀 협업 을 좋아합니다", &ScoringPolicy::default())? {
//!     Prepared::Degenerate(report) => report,
//!     Prepared::Pending(pending) => {
//!         let response = aggregate(pending.request())?;
//!         pending.finish(&session, &response)?
//!     }
//! };
//! assert_eq!(report.breakdown().len(), 6);
//! # Ok(())
//! # }
//! ```

use crate::errors::BlindScoreError;
use crate::features::{FeatureVector, extract_features, trimmed_answer};
use crate::keypair::KeyPair;
use crate::policy::{ActiveSet, ScoringPolicy};
use crate::preset::lexicon::Lexicon;
use crate::protocol::encryption::{build_request, decode_response, decrypt_all, encrypt_active};
use crate::protocol::wire::{ComputeRequest, ComputeResponse};
use crate::score::{ScoreReport, calculate, cannot_evaluate};

/// Lifecycle of the session key pair. Only `Pending` may transition.
#[derive(Debug)]
pub enum KeyState {
    Pending,
    Ready(KeyPair),
    Failed(String),
}

#[derive(Debug)]
pub struct Session {
    keys: KeyState,
    lexicon: Lexicon,
}

/// Outcome of [`Session::prepare`].
#[derive(Debug)]
pub enum Prepared {
    /// Every weight was 0: the report is final and nothing was encrypted.
    Degenerate(ScoreReport),
    /// Encrypted request waiting for the aggregator's reply.
    Pending(PendingScore),
}

/// A request in flight, together with everything needed to finish it locally.
#[derive(Debug, Clone)]
pub struct PendingScore {
    request: ComputeRequest,
    active: ActiveSet,
    display: FeatureVector,
    policy: ScoringPolicy,
}

impl Session {
    /// A session whose keys are still being generated.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            keys: KeyState::Pending,
            lexicon,
        }
    }

    pub fn with_keys(keys: KeyPair, lexicon: Lexicon) -> Self {
        Self {
            keys: KeyState::Ready(keys),
            lexicon,
        }
    }

    /// Records the outcome of key generation.
    ///
    /// # Errors
    /// `KeyGeneration` when keys were already installed (or already failed), or when `outcome`
    /// itself is an error. In the latter case the session stays `Failed`.
    pub fn install(
        &mut self,
        outcome: Result<KeyPair, BlindScoreError>,
    ) -> Result<(), BlindScoreError> {
        if !matches!(self.keys, KeyState::Pending) {
            return Err(BlindScoreError::KeyGeneration(
                "session keys were already installed".into(),
            ));
        }
        match outcome {
            Ok(keys) => {
                self.keys = KeyState::Ready(keys);
                Ok(())
            }
            Err(e) => {
                let message = match e {
                    BlindScoreError::KeyGeneration(reason) => reason,
                    other => other.to_string(),
                };
                self.keys = KeyState::Failed(message.clone());
                Err(BlindScoreError::KeyGeneration(message))
            }
        }
    }

    pub fn state(&self) -> &KeyState {
        &self.keys
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.keys, KeyState::Ready(_))
    }

    /// The session key pair.
    ///
    /// # Errors
    /// `NotReady` while generation is pending, `KeyGeneration` when it failed.
    pub fn keys(&self) -> Result<&KeyPair, BlindScoreError> {
        match &self.keys {
            KeyState::Ready(keys) => Ok(keys),
            KeyState::Pending => Err(BlindScoreError::NotReady),
            KeyState::Failed(reason) => Err(BlindScoreError::KeyGeneration(reason.clone())),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Extracts, selects and encrypts.
    ///
    /// Checks run in order: keys ready, answer non-empty, at least one active category.
    pub fn prepare(
        &self,
        answer: &str,
        policy: &ScoringPolicy,
    ) -> Result<Prepared, BlindScoreError> {
        let keys = self.keys()?;
        let answer = trimmed_answer(answer)?;

        let active = policy.active();
        if active.is_empty() {
            log::debug!("all weights are zero, skipping encryption");
            return Ok(Prepared::Degenerate(cannot_evaluate()));
        }

        let display = extract_features(answer, &self.lexicon);
        let public_key = keys.public_key();
        let ciphertexts = encrypt_active(&display, &active, public_key)?;
        let request = build_request(public_key, &ciphertexts, &active, policy)?;

        Ok(Prepared::Pending(PendingScore {
            request,
            active,
            display,
            policy: *policy,
        }))
    }
}

impl PendingScore {
    /// The body to send to `POST /compute`.
    pub fn request(&self) -> &ComputeRequest {
        &self.request
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// The plaintext counts, for display next to the decrypted contributions.
    pub fn features(&self) -> &FeatureVector {
        &self.display
    }

    /// The weights this request was built with.
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Decrypts the aggregator's reply and computes the report.
    ///
    /// # Errors
    /// `Decryption` when the reply does not line up with the request or was not produced under
    /// the session key. Nothing partial is returned.
    pub fn finish(
        &self,
        session: &Session,
        response: &ComputeResponse,
    ) -> Result<ScoreReport, BlindScoreError> {
        let keys = session.keys()?;
        let ciphertexts = decode_response(response, keys.public_key(), self.active.len())?;
        let scored = decrypt_all(&ciphertexts, keys.private_key())?;
        calculate(&scored, &self.display, &self.policy, &self.active)
    }
}
