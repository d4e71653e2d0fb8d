//! Console reporter with colored output

use crate::audit::scoring::ScoreCalculator;
use crate::audit::AuditOutcome;
use crate::{AuditScore, RepoRef, ScoreBreakdown};
use colored::{Color, Colorize};

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Announce the start of an audit
    pub fn print_scanning(&self, repo: &RepoRef) {
        println!("{}", self.paint("🔍 Scanning repo for growth opportunities...", Color::Blue));
        println!(
            "{}",
            self.paint(&format!("📡 Fetching {} from GitHub...", repo), Color::BrightBlack)
        );
    }

    /// Print an audit outcome
    pub fn report(&self, outcome: &AuditOutcome, share: bool) {
        print!("{}", self.render(outcome, share));
    }

    /// Render an audit outcome as console text
    pub fn render(&self, outcome: &AuditOutcome, share: bool) -> String {
        let score = &outcome.score;
        let mut out = String::new();

        let headline = format!("✅ Growth Score: {}/100", score.total);
        push_line(&mut out, format!("\n{}", self.paint(&headline, Color::Green)));

        if self.verbose {
            push_line(&mut out, format!("   {}", self.create_score_bar(score.total)));
            let description = ScoreCalculator::score_description(score.total);
            push_line(&mut out, format!("   {}", self.paint(description, Color::BrightBlack)));
            self.render_breakdown(&mut out, &outcome.breakdown);
        }

        let summary = format!("📊 Missing {} critical events:", score.missing.len());
        push_line(&mut out, format!("\n{}", self.paint(&summary, Color::Yellow)));
        for (i, event) in score.missing.iter().enumerate() {
            push_line(&mut out, self.paint(&format!("   {}. {}", i + 1, event), Color::Red));
        }

        if self.verbose && !score.recommendations.is_empty() {
            push_line(&mut out, format!("\n   {}", self.bold("Recommendations:")));
            for rec in &score.recommendations {
                push_line(&mut out, format!("   • {}", rec));
            }
        }

        if share {
            let text = Self::share_text(score);
            push_line(&mut out, format!("\n{}", self.paint(&text, Color::Cyan)));
        }

        let fix_hint = "💡 Fix these issues with: npx growthos init";
        push_line(&mut out, format!("\n{}", self.paint(fix_hint, Color::Blue)));
        push_line(
            &mut out,
            self.paint(
                "   Get full analytics + A/B tests + referrals in <30min",
                Color::BrightBlack,
            ),
        );
        out
    }

    /// Social-media line naming the first two missing capabilities
    pub fn share_text(score: &AuditScore) -> String {
        format!(
            "🚀 Shareable: \"Just scored {}/100 on growth tracking with @GrowthOS - here's what I'm missing: {}\"",
            score.total,
            score.top_missing(2)
        )
    }

    /// Announce where the report goes
    pub fn print_report_saved(&self, file_name: &str) {
        println!(
            "{}",
            self.paint(&format!("📄 Report saved: {}", file_name), Color::Green)
        );
    }

    fn render_breakdown(&self, out: &mut String, breakdown: &ScoreBreakdown) {
        push_line(out, format!("\n   {}", self.bold("Score Breakdown:")));
        let rows = [
            ("Analytics library", breakdown.analytics, 30),
            ("Event tracking", breakdown.events, 40),
            ("Payment tracking", breakdown.payments, 15),
            ("Auth events", breakdown.auth, 15),
        ];
        for (label, points, max) in rows {
            let line = format!("{:<20} {:>2}/{}", label, points, max);
            let color = if points == max {
                Color::Green
            } else if points > 0 {
                Color::Yellow
            } else {
                Color::Red
            };
            push_line(out, format!("   {}", self.paint(&line, color)));
        }
        if breakdown.vanity_penalty != 0 {
            let line = format!("{:<20} {:>3}", "Vanity metrics", breakdown.vanity_penalty);
            push_line(out, format!("   {}", self.paint(&line, Color::Red)));
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if score >= 80 {
            self.paint(&bar, Color::Green)
        } else if score >= 50 {
            self.paint(&bar, Color::Yellow)
        } else {
            self.paint(&bar, Color::Red)
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Append one line of rendered output
fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
