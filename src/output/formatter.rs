//! Output formatters for analysis reports

use crate::classifier::verdict::Verdict;
use crate::config::OutputFormat;
use crate::error::{ClassifierError, Result};
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::fmt::Write;
use std::path::Path;

/// Trait for rendering a batch of reports
pub trait OutputFormatter {
    fn format_reports(&self, reports: &[AnalysisReport]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    detailed: bool,
}

/// Picks the formatter for the requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn verdict_color(verdict: Verdict) -> Color {
        match verdict {
            Verdict::Likely => Color::Green,
            Verdict::Possible => Color::Yellow,
            Verdict::Unlikely => Color::Red,
        }
    }

    fn write_report(&self, out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        let color = Self::verdict_color(report.verdict);

        writeln!(out, "📄 {}", report.source)?;
        writeln!(
            out,
            "  Вероятность: {}",
            self.paint(&format!("{:.1}%", report.percentage), color)
        )?;
        writeln!(
            out,
            "  {} ({})",
            self.paint(&report.conclusion, color),
            report.verdict
        )?;

        if self.detailed {
            writeln!(out, "  Tokens: {}", report.token_count)?;
            if let Some(preview) = &report.normalized_preview {
                writeln!(out, "  Normalized: {}", preview)?;
            }
            writeln!(out, "  Processing time: {}ms", report.processing_time_ms)?;
        }
        Ok(())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_reports(&self, reports: &[AnalysisReport]) -> Result<String> {
        let mut out = String::new();
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.write_report(&mut out, report)
                .map_err(|e| ClassifierError::OutputFormatting(e.to_string()))?;
        }
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_reports(&self, reports: &[AnalysisReport]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(reports)?
        } else {
            serde_json::to_string(reports)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    fn write_table(&self, out: &mut String, reports: &[AnalysisReport]) -> std::fmt::Result {
        writeln!(out, "# Результат проверки\n")?;
        writeln!(out, "| Источник | Вероятность | Вердикт | Вывод |")?;
        writeln!(out, "|---|---:|---|---|")?;
        for report in reports {
            writeln!(
                out,
                "| `{}` | {:.1}% | {} | {} |",
                report.source, report.percentage, report.verdict, report.conclusion
            )?;
        }

        if self.detailed {
            for report in reports {
                writeln!(out, "\n## `{}`\n", report.source)?;
                writeln!(out, "- Tokens: {}", report.token_count)?;
                writeln!(out, "- Processing time: {}ms", report.processing_time_ms)?;
                writeln!(out, "- Generated: {}", report.generated_at.to_rfc3339())?;
                if let Some(preview) = &report.normalized_preview {
                    writeln!(out, "\n```\n{}\n```", preview)?;
                }
            }
        }
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_reports(&self, reports: &[AnalysisReport]) -> Result<String> {
        let mut out = String::new();
        self.write_table(&mut out, reports)
            .map_err(|e| ClassifierError::OutputFormatting(e.to_string()))?;
        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate(&self, reports: &[AnalysisReport], format: OutputFormat) -> Result<String> {
        self.formatter(format).format_reports(reports)
    }

    pub fn save(&self, content: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
