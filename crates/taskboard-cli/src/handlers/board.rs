use serde_json::json;
use taskboard_cli::{output, BoardController, LogicalCommand, RecordingSink, RenderEvent};
use taskboard_core::{DefaultCardConfig, TaskboardError};
use taskboard_domain::{Board, ColumnSet};
use taskboard_persistence::{
    AtomicWriter, CardStore, FormatVersion, JsonFileStore, JsonSerializer, Migrator, Serializer,
};

pub async fn handle_show<S: CardStore>(controller: &mut BoardController<S>) -> anyhow::Result<()> {
    let mut sink = RecordingSink::new();
    controller.execute(LogicalCommand::Show, &mut sink).await?;

    let columns: Vec<_> = sink
        .events
        .iter()
        .filter_map(|event| match event {
            RenderEvent::RedrawColumn {
                column,
                name,
                cards,
            } => Some(json!({
                "index": column,
                "name": name,
                "cards": cards,
            })),
            RenderEvent::Focus { .. } => None,
        })
        .collect();

    output::output_success(json!({
        "columns": columns,
        "focus": sink.last_focus(),
    }));
    Ok(())
}

/// Report ordering problems without repairing, seeding or migrating anything.
///
/// Legacy files are converted in memory only, so the report reflects what
/// opening the board would see.
pub async fn handle_check(
    store: &JsonFileStore,
    columns: ColumnSet,
    default_card: DefaultCardConfig,
) -> anyhow::Result<()> {
    let path = store.path();
    let (format, cards) = if !path.exists() {
        ("missing", None)
    } else {
        let bytes = AtomicWriter::read_all(path).await?;
        match Migrator::detect_version(path).await? {
            FormatVersion::Legacy => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
                ("legacy", Some(Migrator::convert_legacy(value)?))
            }
            FormatVersion::Current => ("current", Some(JsonSerializer.deserialize(&bytes)?)),
        }
    };

    let violations: Vec<String> = match cards {
        Some(cards) => Board::from_cards(columns, cards, default_card)?
            .check()
            .iter()
            .map(ToString::to_string)
            .collect(),
        None => Vec::new(),
    };

    output::output_success(json!({
        "location": store.location(),
        "format": format,
        "count": violations.len(),
        "violations": violations,
    }));
    Ok(())
}
