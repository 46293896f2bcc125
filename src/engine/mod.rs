//! The certificate rendering engine.
//!
//! Turns a verified roster record plus two binary assets (the background
//! artwork and the typeface program) into a finished PDF byte stream. The
//! engine is a stateless pipeline over a process-wide fill-once asset
//! cache: each render resolves the award's profile, measures and places the
//! text fields, paints the simulated outline, and serializes one page. It
//! never partially renders, never logs, and never retries — failures carry
//! the failing asset or stage for the caller to translate.

pub mod assets;
pub mod error;
pub mod layout;
pub mod outline;
mod pdf;
pub mod profile;

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

pub use assets::{
    AssetCache, AssetSource, DirSource, FontAsset, HttpSource, StandardSource, TemplateAsset,
    FONT_KEY,
};
pub use error::{AssetError, RenderError};
pub use profile::{profile, Award, AwardProfile};

/// MIME type of every rendered document.
pub const MIME_TYPE: &str = "application/pdf";

/// A roster-matched identity the engine trusts without re-checking.
///
/// Produced by [`Roster::verify`](crate::roster::Roster::verify); the award
/// and average always come from the roster entry, never from a client
/// re-submission.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedRecord {
    pub name: String,
    pub student_id: String,
    pub award: Award,
    pub gpa: Option<String>,
}

static STUDENT_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Shape every roster student ID must have.
pub fn valid_student_id(id: &str) -> bool {
    STUDENT_ID_RE
        .get_or_init(|| Regex::new(r"^2025-\d{5}-MN-0$").unwrap())
        .is_match(id)
}

impl VerifiedRecord {
    /// Defense-in-depth precondition check.
    ///
    /// Verification proper happens at the roster; this only rejects records
    /// that cannot have come from it — a malformed student ID, or a missing
    /// average on an award whose layout renders one. An empty name is not a
    /// verification failure; it renders as a zero-width centered run.
    fn check_verified(&self) -> Result<(), RenderError> {
        if !valid_student_id(&self.student_id) {
            return Err(RenderError::VerificationRequired);
        }
        if profile(self.award).subtitle.is_some() && self.gpa.is_none() {
            return Err(RenderError::VerificationRequired);
        }
        Ok(())
    }
}

/// The finished document: PDF bytes plus a suggested download filename.
///
/// Transient — owned solely by the caller; the engine keeps no reference.
#[derive(Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn suggested_filename(record: &VerifiedRecord) -> String {
    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").unwrap());
    format!(
        "Certificate_{}_{}.pdf",
        record.award.tag(),
        re.replace_all(&record.name, "_")
    )
}

/// The document composer over a shared asset cache.
pub struct Engine<S> {
    cache: AssetCache<S>,
}

/// The engine as the service runs it, over the configured standard source.
pub type CertificateEngine = Engine<StandardSource>;

impl<S: AssetSource> Engine<S> {
    /// `timeout` bounds each underlying asset load; on expiry the render
    /// fails with an unavailable-asset error instead of hanging.
    pub fn new(source: S, timeout: Duration) -> Self {
        Self {
            cache: AssetCache::new(source, timeout),
        }
    }

    /// Render one certificate for a verified record.
    ///
    /// For a fixed record and asset set the output layout is deterministic:
    /// same page size, same glyph positions, same content stream. Only the
    /// document's creation-date metadata differs between runs.
    pub async fn render(&self, record: &VerifiedRecord) -> Result<RenderedDocument, RenderError> {
        record.check_verified()?;
        let profile = profile(record.award);
        let font = self.cache.font().await?;
        let template = self.cache.template(record.award).await?;
        let bytes = pdf::compose(record, profile, &font, &template)?;
        Ok(RenderedDocument {
            bytes,
            filename: suggested_filename(record),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, award: Award, gpa: Option<&str>) -> VerifiedRecord {
        VerifiedRecord {
            name: name.to_string(),
            student_id: "2025-00001-MN-0".to_string(),
            award,
            gpa: gpa.map(str::to_string),
        }
    }

    #[test]
    fn filename_replaces_whitespace_runs_with_underscores() {
        let rec = record("Juan Dela Cruz", Award::DeansLister, None);
        assert_eq!(suggested_filename(&rec), "Certificate_DL_Juan_Dela_Cruz.pdf");

        let rec = record("Maria  Clara\tIbarra", Award::PresidentsLister, None);
        assert_eq!(
            suggested_filename(&rec),
            "Certificate_PL_Maria_Clara_Ibarra.pdf"
        );
    }

    #[test]
    fn student_id_shape() {
        assert!(valid_student_id("2025-00001-MN-0"));
        assert!(valid_student_id("2025-99999-MN-0"));
        assert!(!valid_student_id("2024-00001-MN-0"));
        assert!(!valid_student_id("2025-001-MN-0"));
        assert!(!valid_student_id("2025-00001-MN-1"));
        assert!(!valid_student_id(""));
    }

    #[test]
    fn malformed_id_fails_the_precondition() {
        let mut rec = record("Juan Dela Cruz", Award::DeansLister, None);
        rec.student_id = "not-an-id".to_string();
        assert!(matches!(
            rec.check_verified(),
            Err(RenderError::VerificationRequired)
        ));
    }

    #[test]
    fn subtitle_award_requires_an_average() {
        let rec = record("Juan Dela Cruz", Award::AcademicAchiever, None);
        assert!(matches!(
            rec.check_verified(),
            Err(RenderError::VerificationRequired)
        ));
        let rec = record("Juan Dela Cruz", Award::AcademicAchiever, Some("1.25"));
        assert!(rec.check_verified().is_ok());
    }

    #[test]
    fn empty_name_is_not_a_verification_failure() {
        let rec = record("", Award::DeansLister, None);
        assert!(rec.check_verified().is_ok());
    }
}
