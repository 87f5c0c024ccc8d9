use provenant_audit::{ProvenanceRecord, ProvenanceRecorder};
use provenant_core::{DirectiveSet, ProvenantConfig};
use provenant_policy::{Decision, DirectiveExtractor, PermissionEvaluator, Verdict};
use std::borrow::Cow;
use std::sync::Arc;
use url::Url;

use crate::error::CheckError;
use crate::fetch::{DirectiveFetcher, HttpFetcher};

/// Result of one permission check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub decision: Decision,
    /// The record appended for this decision.
    pub record: ProvenanceRecord,
}

impl CheckOutcome {
    pub fn verdict(&self) -> Verdict {
        self.decision.verdict
    }

    pub fn is_allowed(&self) -> bool {
        self.decision.is_allowed()
    }
}

/// Runs the full pipeline for one URL: fetch, extract, evaluate, record.
pub struct PermissionChecker {
    fetcher: Arc<dyn DirectiveFetcher>,
    extractor: DirectiveExtractor,
    evaluator: PermissionEvaluator,
    recorder: ProvenanceRecorder,
    directive_path: String,
}

impl PermissionChecker {
    pub fn new(
        fetcher: Arc<dyn DirectiveFetcher>,
        evaluator: PermissionEvaluator,
        recorder: ProvenanceRecorder,
    ) -> Self {
        Self {
            fetcher,
            extractor: DirectiveExtractor::new(),
            evaluator,
            recorder,
            directive_path: "/robots.txt".to_string(),
        }
    }

    /// Build a checker with an HTTP fetcher and a file-backed recorder.
    pub fn from_config(config: &ProvenantConfig) -> Result<Self, CheckError> {
        let fetcher = HttpFetcher::from_config(&config.agent, &config.fetch)?;
        Ok(Self::new(
            Arc::new(fetcher),
            PermissionEvaluator::new(&config.agent),
            ProvenanceRecorder::from_config(&config.audit),
        )
        .with_directive_path(&config.fetch.directive_path))
    }

    /// Where the directive document lives, relative to the site origin.
    pub fn with_directive_path(mut self, path: impl Into<String>) -> Self {
        self.directive_path = path.into();
        self
    }

    pub fn recorder(&self) -> &ProvenanceRecorder {
        &self.recorder
    }

    /// Check whether the configured agent may access `url`.
    ///
    /// A verdict is produced for every well-formed URL, whatever happens while
    /// fetching the directive document. Only an invalid URL or a failure to
    /// append the provenance record is an error.
    pub async fn check(&self, url: &str) -> Result<CheckOutcome, CheckError> {
        let target = parse_target(url)?;
        let document_url = self.document_url(url, &target)?;

        let path = request_path(&target);

        let directives = self.load_directives(&document_url).await;
        let decision = self.evaluator.evaluate(&directives, &path);

        tracing::info!(
            url,
            path = %path,
            allowed = decision.is_allowed(),
            rule = %decision.rule,
            "Permission evaluated"
        );

        let record = self
            .recorder
            .record(url, decision.is_allowed(), directives)
            .await?;

        Ok(CheckOutcome { decision, record })
    }

    async fn load_directives(&self, document_url: &Url) -> DirectiveSet {
        match self.fetcher.fetch(document_url).await {
            Ok(text) => self.extractor.extract(&text),
            Err(e) => {
                // An unavailable document reads as an empty one.
                tracing::warn!(
                    document = %document_url,
                    error = %e,
                    "Directive document unavailable, treating as empty"
                );
                DirectiveSet::new()
            }
        }
    }

    /// The directive document on the target's own origin.
    ///
    /// The configured path replaces the target's path verbatim, so a value such
    /// as `//other.example/robots.txt` stays on the target host.
    fn document_url(&self, url: &str, target: &Url) -> Result<Url, CheckError> {
        let mut document = target.clone();
        if document.set_username("").is_err() || document.set_password(None).is_err() {
            return Err(CheckError::UnsupportedUrl {
                url: url.to_string(),
                reason: "URL cannot carry credentials",
            });
        }
        document.set_path(&self.directive_path);
        document.set_query(None);
        document.set_fragment(None);
        Ok(document)
    }
}

/// The path the directives are matched against.
///
/// Percent-escapes are decoded so `Disallow: /privé` covers `/priv%C3%A9/...`.
/// Dot segments have already been resolved by the URL parser, so
/// `/blog/../private` is evaluated as `/private`.
fn request_path(target: &Url) -> Cow<'_, str> {
    let raw = target.path();
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_target(url: &str) -> Result<Url, CheckError> {
    let target = Url::parse(url).map_err(|source| CheckError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    if !matches!(target.scheme(), "http" | "https") {
        return Err(CheckError::UnsupportedUrl {
            url: url.to_string(),
            reason: "scheme must be http or https",
        });
    }
    if target.host_str().is_none_or(str::is_empty) {
        return Err(CheckError::UnsupportedUrl {
            url: url.to_string(),
            reason: "URL has no host",
        });
    }

    Ok(target)
}
