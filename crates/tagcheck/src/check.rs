use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use tagcheck_conf::Settings;
use tagcheck_templates::check_template;
use tagcheck_templates::TemplateMarkers;
use tagcheck_templates::VALID_MESSAGE;

pub struct Check {
    paths: Vec<Utf8PathBuf>,
    markers: TemplateMarkers,
}

impl Check {
    #[must_use]
    pub fn new(paths: &[Utf8PathBuf], settings: &Settings, project_root: &Utf8Path) -> Self {
        let paths = if paths.is_empty() {
            vec![settings.default_path().to_owned()]
        } else {
            paths.to_vec()
        };

        let paths = paths
            .into_iter()
            .map(|p| {
                if p.is_relative() {
                    project_root.join(p)
                } else {
                    p
                }
            })
            .collect();

        Self {
            paths,
            markers: TemplateMarkers::new(settings.start_marker(), settings.end_marker()),
        }
    }

    pub fn execute(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let show_headers = self.paths.len() > 1;

        for (i, path) in self.paths.iter().enumerate() {
            if show_headers {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "==> {path} <==")?;
            }
            self.check_file(path, &mut out)?;
        }

        Ok(())
    }

    fn check_file(&self, path: &Utf8Path, out: &mut impl Write) -> Result<()> {
        let source =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;

        tracing::info!(%path, "checking template");

        let mut write_result = Ok(());
        let report = check_template(&source, &self.markers, |error| {
            if write_result.is_ok() {
                write_result = writeln!(out, "{error}");
            }
        });
        write_result?;

        if report.is_valid() {
            writeln!(out, "{VALID_MESSAGE}")?;
        }

        tracing::info!(%path, errors = report.errors().len(), "checked template");
        Ok(())
    }
}
