/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::marketplace
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Interface with the vsce marketplace tool to retrieve the
    published metadata and statistics of one extension.

  Security / Safety Notes:
    Executes the configured tool with user privileges only;
    arguments are fixed at build time, never shell-expanded.

  Dependencies:
    tokio::process for async command execution, serde_json
    for decoding.

  Operational Scope:
    Supplies the report formatter with a decoded QueryResult.

  Revision History:
    2026-10-15 COD  Crafted vsce integration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic command invocation with explicit checks
    - Structured parsing with clear failure modes
    - Child process reaped or killed on every path
============================================================*/

use std::future::Future;
use std::io;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::{ExtensionTarget, QueryTool};
use crate::error::{Result, StatsError};
use crate::logger::Logger;
use crate::model::QueryResult;

/// Run `<tool> show --json <publisher>.<extension>` and decode its stdout.
///
/// The child's stderr is inherited. If `cancel` resolves first the child
/// is killed and the fetch fails with [`StatsError::Interrupted`].
pub async fn fetch<C>(
    tool: &QueryTool,
    target: &ExtensionTarget,
    cancel: C,
    logger: &Logger,
) -> Result<QueryResult>
where
    C: Future<Output = ()>,
{
    let identifier = target.to_string();
    let rendered = render_command(tool, &identifier);
    logger.debug("FETCH", format!("Running `{rendered}`"));

    let mut command = Command::new(tool.program);
    command
        .args(tool.args)
        .args(["show", "--json", identifier.as_str()])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let output = tokio::select! {
        output = command.output() => output.map_err(|err| map_spawn_error(err, tool.program))?,
        _ = cancel => return Err(StatsError::Interrupted { command: rendered }),
    };

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("exited with status {code}"),
            None => format!("terminated by {}", output.status),
        };
        return Err(StatsError::CommandFailure {
            command: rendered,
            status,
        });
    }

    let result = decode(&output.stdout)?;
    logger.info(
        "FETCH",
        format!(
            "Decoded {identifier}: versions={} statistics={}",
            result.versions.len(),
            result.statistics.len()
        ),
    );
    Ok(result)
}

/// Decode the first JSON document in `bytes`; anything after it is ignored.
pub fn decode(bytes: &[u8]) -> Result<QueryResult> {
    let mut stream = serde_json::Deserializer::from_slice(bytes).into_iter::<QueryResult>();
    match stream.next() {
        Some(result) => Ok(result?),
        // Empty input: let the strict parser produce the EOF diagnostic.
        None => Ok(serde_json::from_slice(bytes)?),
    }
}

fn render_command(tool: &QueryTool, identifier: &str) -> String {
    let mut parts = vec![tool.program];
    parts.extend_from_slice(tool.args);
    parts.extend(["show", "--json", identifier]);
    parts.join(" ")
}

fn map_spawn_error(err: io::Error, command: &str) -> StatsError {
    if err.kind() == io::ErrorKind::NotFound {
        StatsError::CommandMissing {
            command: command.into(),
        }
    } else {
        StatsError::Runtime(format!("Failed to run {command}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TARGET;
    use crate::model::StatValue;

    fn quiet() -> Logger {
        Logger::new(None, false).expect("stderr logger")
    }

    #[test]
    fn decode_reads_scenario_payload() {
        let result = decode(
            br#"{"lastUpdated":"2024-01-01T00:00:00Z","publishedDate":"2023-01-01T00:00:00Z","releaseDate":"2023-01-01T00:00:00Z","versions":[{"version":"1.2.3","lastUpdated":"2024-01-01T00:00:00Z"}],"statistics":[{"statisticName":"install","value":100}]}"#,
        )
        .expect("decodes");
        assert_eq!(result.latest_version(), Some("1.2.3"));
        let install = result.statistic("install").expect("install present");
        assert!(matches!(install, StatValue::Integer(_)));
        assert_eq!(install.to_string(), "100");
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode(b"not json").unwrap_err();
        assert!(matches!(err, StatsError::Decode(_)));
    }

    #[test]
    fn decode_accepts_unusual_statistic_values() {
        let result = decode(
            br#"{"statistics":[{"statisticName":"install","value":"lots"},{"statisticName":"ratingcount","value":1e400}]}"#,
        )
        .expect("decodes");
        assert_eq!(result.statistic("install"), Some(&StatValue::Text("lots".into())));
        assert_eq!(result.statistic("ratingcount").unwrap().to_string(), "1e400");
    }

    #[test]
    fn decode_rejects_empty_output() {
        let err = decode(b"").unwrap_err();
        assert!(matches!(err, StatsError::Decode(_)));
    }

    #[test]
    fn decode_ignores_trailing_output() {
        let result = decode(b"{\"versions\":[]}\nnpm notice: update available\n").expect("decodes");
        assert!(result.versions.is_empty());
    }

    #[test]
    fn command_line_is_rendered_in_order() {
        let tool = QueryTool {
            program: "npx",
            args: &["vsce"],
        };
        assert_eq!(
            render_command(&tool, "golang.go"),
            "npx vsce show --json golang.go"
        );
    }

    #[cfg(unix)]
    mod subprocess {
        use super::*;

        const ECHO_FIXTURE: QueryTool = QueryTool {
            program: "sh",
            args: &[
                "-c",
                r#"[ "$1" = show ] && [ "$2" = --json ] && [ "$3" = golang.go ] || exit 3
printf '%s' '{"versions":[{"version":"0.42.0"}],"statistics":[{"statisticName":"install","value":12345678901234}]}'"#,
                "vsce-stub",
            ],
        };

        #[tokio::test]
        async fn fetch_decodes_tool_output() {
            let result = fetch(&ECHO_FIXTURE, &DEFAULT_TARGET, std::future::pending(), &quiet())
                .await
                .expect("fetch succeeds");
            assert_eq!(result.latest_version(), Some("0.42.0"));
            assert_eq!(
                result.statistic("install").map(ToString::to_string).as_deref(),
                Some("12345678901234")
            );
        }

        #[tokio::test]
        async fn non_zero_exit_is_command_failure() {
            let tool = QueryTool {
                program: "sh",
                args: &["-c", "exit 1", "vsce-stub"],
            };
            let err = fetch(&tool, &DEFAULT_TARGET, std::future::pending(), &quiet())
                .await
                .unwrap_err();
            match err {
                StatsError::CommandFailure { command, status } => {
                    assert!(command.ends_with("show --json golang.go"));
                    assert_eq!(status, "exited with status 1");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn missing_tool_is_reported() {
            let tool = QueryTool {
                program: "vsce-stats-no-such-tool",
                args: &[],
            };
            let err = fetch(&tool, &DEFAULT_TARGET, std::future::pending(), &quiet())
                .await
                .unwrap_err();
            assert!(matches!(err, StatsError::CommandMissing { .. }));
        }

        #[tokio::test]
        async fn malformed_output_is_decode_error() {
            let tool = QueryTool {
                program: "sh",
                args: &["-c", "echo not json", "vsce-stub"],
            };
            let err = fetch(&tool, &DEFAULT_TARGET, std::future::pending(), &quiet())
                .await
                .unwrap_err();
            assert!(matches!(err, StatsError::Decode(_)));
        }

        #[tokio::test]
        async fn cancellation_aborts_the_child() {
            let tool = QueryTool {
                program: "sh",
                args: &["-c", "sleep 5", "vsce-stub"],
            };
            let cancel = tokio::time::sleep(std::time::Duration::from_millis(50));
            let err = fetch(&tool, &DEFAULT_TARGET, cancel, &quiet())
                .await
                .unwrap_err();
            assert!(matches!(err, StatsError::Interrupted { .. }));
            assert!(err.is_fetch_error());
        }
    }
}
