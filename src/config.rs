/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Fix the extension target, the marketplace tool invocation,
    and the reported statistic columns for this build.

  Security / Safety Notes:
    Constants only; nothing is read from the environment.

  Dependencies:
    None beyond std.

  Operational Scope:
    Passed into the fetcher and the CSV formatter by main.

  Revision History:
    2026-10-15 COD  Introduced build-time report configuration.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit named constants instead of module state
    - Positional column contract kept in one place
============================================================*/

use std::fmt;

/// Extension whose statistics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionTarget {
    pub publisher: &'static str,
    pub extension: &'static str,
}

impl fmt::Display for ExtensionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.publisher, self.extension)
    }
}

/// External marketplace-query tool: a program plus the leading
/// arguments that precede `show --json <id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

pub const DEFAULT_TARGET: ExtensionTarget = ExtensionTarget {
    publisher: "golang",
    extension: "go",
};

pub const DEFAULT_TOOL: QueryTool = QueryTool {
    program: "npx",
    args: &["vsce"],
};

/// Statistic columns, in output order, following the fixed columns.
/// CSV consumers address these by position.
pub const REPORTED_STATISTICS: [&str; 9] = [
    "install",
    "averagerating",
    "ratingcount",
    "trendingdaily",
    "trendingmonthly",
    "trendingweekly",
    "updateCount",
    "weightedRating",
    "downloadCount",
];

/// Everything one reporting run needs besides the header flag.
#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub target: ExtensionTarget,
    pub tool: QueryTool,
    pub statistics: &'static [&'static str],
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            tool: DEFAULT_TOOL,
            statistics: &REPORTED_STATISTICS,
        }
    }
}
