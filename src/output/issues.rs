//! Issue log for a checking run
//!
//! Every line goes to the reporter as soon as it is produced (unless terse
//! mode holds it back) and issues are also kept per page for the end-of-run
//! summary.

use crate::output::traits::Reporter;
use std::collections::HashMap;

/// Issues recorded against one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIssues {
    pub page: String,
    pub messages: Vec<String>,
}

/// Append-only log of informational lines and issues
pub struct IssueLog<'a> {
    reporter: &'a mut dyn Reporter,
    terse: bool,
    pages: Vec<PageIssues>,
    page_index: HashMap<String, usize>,
    count: usize,
}

impl<'a> IssueLog<'a> {
    /// Creates an empty log that forwards to `reporter`
    ///
    /// With `terse` set nothing is forwarded until [`IssueLog::finish_terse`].
    pub fn new(reporter: &'a mut dyn Reporter, terse: bool) -> Self {
        Self {
            reporter,
            terse,
            pages: Vec::new(),
            page_index: HashMap::new(),
            count: 0,
        }
    }

    /// Records an informational line
    pub fn log_ok(&mut self, message: &str) {
        if !self.terse {
            self.reporter.ok(message);
        }
    }

    /// Records an issue against `page`
    pub fn log_issue(&mut self, page: &str, message: &str) {
        if !self.terse {
            self.reporter.issue(message);
        }

        let index = match self.page_index.get(page) {
            Some(index) => *index,
            None => {
                self.pages.push(PageIssues {
                    page: page.to_string(),
                    messages: Vec::new(),
                });
                self.page_index.insert(page.to_string(), self.pages.len() - 1);
                self.pages.len() - 1
            }
        };
        self.pages[index].messages.push(message.to_string());
        self.count += 1;
    }

    /// Total number of issues
    pub fn count(&self) -> usize {
        self.count
    }

    /// Issues grouped by page, pages in first-issue order
    pub fn pages(&self) -> &[PageIssues] {
        &self.pages
    }

    /// Formats the page-grouped summary
    ///
    /// Returns an empty string when there are no issues.
    pub fn summarize(&self) -> String {
        format_summary(&self.pages)
    }

    /// Count line used for the final failure message
    pub fn count_message(&self) -> String {
        format!("{}, see above", issue_count_text(self.count))
    }

    /// Emits the end-of-run output used in terse mode
    ///
    /// With `summary` set the grouped summary precedes the count line.
    pub fn finish_terse(&mut self, pages: usize, links: usize, summary: bool) {
        if !self.terse {
            return;
        }
        if summary {
            for line in format_summary(&self.pages).lines() {
                self.reporter.issue(line);
            }
        }
        let line = format!(
            "Checked {} page{} and {} link{}, {}",
            pages,
            plural(pages),
            links,
            plural(links),
            issue_count_text(self.count)
        );
        if self.count == 0 {
            self.reporter.ok(&line);
        } else {
            self.reporter.issue(&line);
        }
    }
}

/// Formats grouped issues: a header, then each page with its messages indented
pub fn format_summary(pages: &[PageIssues]) -> String {
    if pages.is_empty() {
        return String::new();
    }

    let mut summary = String::from("Summary of issues:\n");
    for page in pages {
        summary.push_str(&format!(" {}\n", page.page));
        for message in &page.messages {
            summary.push_str(&format!("  {}\n", message));
        }
    }
    summary
}

/// `1 issue`, `2 issues`
pub fn issue_count_text(count: usize) -> String {
    format!("{} issue{}", count, plural(count))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
