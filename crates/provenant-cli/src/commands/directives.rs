//! `provenant directives` - inspect a local directive document.
//!
//! Shows what the extractor keeps from the file and, with `--path`, what the
//! evaluator would decide. Nothing is fetched and nothing is recorded.

use anyhow::{Context, Result};
use provenant_core::{DirectiveSet, ProvenantConfig};
use provenant_policy::{PermissionEvaluator, extract_directives};
use std::path::Path;

pub fn run(config: &ProvenantConfig, file: &Path, path: Option<&str>) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read directive document {:?}", file))?;

    let directives = extract_directives(&text);
    print!("{}", render_directives(&directives));

    if let Some(path) = path {
        let decision = PermissionEvaluator::new(&config.agent).evaluate(&directives, path);
        println!("{} {} ({})", path, decision.verdict, decision.rule);
    }

    Ok(())
}

fn render_directives(directives: &DirectiveSet) -> String {
    if directives.is_empty() {
        return "(no recognised directives)\n".to_string();
    }
    directives.to_directive_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_directives() {
        let directives = extract_directives("Sitemap: x\nDisallow: /a\nUser-agent: bot\n");
        assert_eq!(render_directives(&directives), "User-agent: bot\nDisallow: /a\n");
        assert_eq!(
            render_directives(&DirectiveSet::new()),
            "(no recognised directives)\n"
        );
    }

    #[test]
    fn test_run_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "User-agent: AI-Training-Crawler\nAllow: /blog").unwrap();

        run(&ProvenantConfig::default(), file.path(), Some("/blog/article1")).unwrap();
        assert!(run(&ProvenantConfig::default(), Path::new("/nonexistent/robots.txt"), None).is_err());
    }
}
