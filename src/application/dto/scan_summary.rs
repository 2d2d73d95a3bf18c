use std::fmt;

/// ScanSummary - counters reported when a traversal finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub identities_processed: usize,
    pub projects_written: usize,
    pub projects_skipped: usize,
    pub impersonations_granted: usize,
    pub impersonations_denied: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} identit{} processed, {} project file(s) written, {} project(s) skipped, \
             {} impersonation(s) granted, {} denied",
            self.identities_processed,
            if self.identities_processed == 1 { "y" } else { "ies" },
            self.projects_written,
            self.projects_skipped,
            self.impersonations_granted,
            self.impersonations_denied,
        )
    }
}
