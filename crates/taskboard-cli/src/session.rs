use crate::command::LogicalCommand;
use crate::controller::BoardController;
use crate::output;
use crate::render::JsonLinesSink;
use std::io::Write;
use taskboard_core::TaskboardResult;
use taskboard_persistence::CardStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Drive a controller from newline-delimited JSON commands.
///
/// The board is drawn once up front. Every input line then produces its
/// render events followed by exactly one reply line. Bad lines and failed
/// commands get an error reply and the session carries on. Ends on `quit`
/// or end of input.
pub async fn run_session<S, R, W>(
    controller: &mut BoardController<S>,
    mut input: R,
    sink: &mut JsonLinesSink<W>,
) -> TaskboardResult<()>
where
    S: CardStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Err(e) = controller.execute(LogicalCommand::Show, sink).await {
        sink.write_line(&output::error_line(&e.to_string()));
    }

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::debug!("Rejected session line that is not UTF-8: {}", e);
                sink.write_line(&output::error_line(
                    "Invalid command: line is not valid UTF-8",
                ));
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let command = match serde_json::from_str::<LogicalCommand>(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Rejected session line {:?}: {}", line, e);
                sink.write_line(&output::error_line(&format!("Invalid command: {}", e)));
                continue;
            }
        };

        let reply = match controller.execute(command, sink).await {
            Ok(outcome) => output::success_line(&outcome),
            Err(e) => output::error_line(&e.to_string()),
        };
        sink.write_line(&reply);

        if controller.is_finished() {
            break;
        }
    }

    tracing::debug!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use taskboard_core::DefaultCardConfig;
    use taskboard_domain::ColumnSet;
    use taskboard_persistence::MemoryStore;

    async fn run(input: &str) -> (Vec<Value>, BoardController<MemoryStore>) {
        run_bytes(input.as_bytes()).await
    }

    async fn run_bytes(input: &[u8]) -> (Vec<Value>, BoardController<MemoryStore>) {
        let mut controller = BoardController::open(
            MemoryStore::new(),
            ColumnSet::default(),
            DefaultCardConfig::default(),
        )
        .await
        .unwrap();
        let mut sink = JsonLinesSink::new(Vec::new());

        run_session(&mut controller, input, &mut sink)
            .await
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (lines, controller)
    }

    fn replies(lines: &[Value]) -> Vec<&Value> {
        lines.iter().filter(|l| l.get("success").is_some()).collect()
    }

    #[tokio::test]
    async fn test_initial_draw_covers_every_column() {
        let (lines, _) = run("").await;

        let redraws: Vec<&Value> = lines
            .iter()
            .filter(|l| l["event"] == "redraw_column")
            .collect();
        assert_eq!(redraws.len(), 4);
        assert_eq!(redraws[0]["name"], "BACKLOG");
        assert_eq!(redraws[0]["cards"][0]["name"], "The default card");
        assert!(replies(&lines).is_empty());
    }

    #[tokio::test]
    async fn test_commands_reply_in_order() {
        let input = concat!(
            r#"{"command":"add","name":"Review","column":1}"#,
            "\n",
            "\n",
            r#"{"command":"move_right","column":0,"position":0}"#,
            "\n",
            r#"{"command":"add","name":"   "}"#,
            "\n",
        );
        let (lines, controller) = run(input).await;

        let replies = replies(&lines);
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["success"], true);
        assert_eq!(replies[0]["data"]["focus"]["column"], 1);
        assert_eq!(replies[1]["data"]["redraw"], serde_json::json!([0, 1]));
        assert_eq!(replies[1]["data"]["focus"]["position"], 1);
        assert_eq!(replies[2]["success"], false);

        assert_eq!(controller.board().column_len(0), 0);
        assert_eq!(controller.board().column_len(1), 2);
        assert!(!controller.is_finished());
    }

    #[tokio::test]
    async fn test_bad_line_does_not_end_session() {
        let input = "not json\n{\"command\":\"quit\"}\n{\"command\":\"show\"}\n";
        let (lines, controller) = run(input).await;

        let replies = replies(&lines);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["success"], false);
        assert!(replies[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid command"));
        assert_eq!(replies[1]["success"], true);
        assert!(controller.is_finished());
    }

    #[tokio::test]
    async fn test_non_utf8_line_gets_error_reply() {
        let mut input = b"{\"command\":\"add\",\"name\":\"caf\xe9\"}\n".to_vec();
        input.extend_from_slice(br#"{"command":"add","name":"after"}"#);
        let (lines, controller) = run_bytes(&input).await;

        let replies = replies(&lines);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["success"], false);
        assert_eq!(
            replies[0]["error"],
            "Invalid command: line is not valid UTF-8"
        );
        assert_eq!(replies[1]["success"], true);
        assert_eq!(controller.board().len(), 2);
    }
}
