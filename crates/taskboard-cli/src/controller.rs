use crate::command::LogicalCommand;
use crate::render::RenderSink;
use taskboard_core::{DefaultCardConfig, TaskboardResult};
use taskboard_domain::{
    AddPlacement, Board, BoardOperations, ColumnSet, CommandOutcome, FocusRef, MoveDirection,
    VerticalDirection,
};
use taskboard_persistence::{load_board, save_board, CardStore};

/// Owns the board for one session and runs logical commands against it.
///
/// Every command that changes the board is followed by a resort, a save
/// and a render notification, in that order. A failed save is returned to
/// the caller but the in-memory board is kept; the next command that
/// reaches the save step writes everything again.
pub struct BoardController<S: CardStore> {
    board: Board,
    store: S,
    placement: AddPlacement,
    focus: Option<FocusRef>,
    unsaved: bool,
    finished: bool,
}

impl<S: CardStore> BoardController<S> {
    /// Load (or seed) the board from `store`, repairing any broken ordering.
    pub async fn open(
        store: S,
        columns: ColumnSet,
        default_card: DefaultCardConfig,
    ) -> TaskboardResult<Self> {
        let mut board = load_board(&store, columns, default_card).await?;

        let violations = board.check();
        if !violations.is_empty() {
            for violation in &violations {
                tracing::warn!("{}: {}", store.location(), violation);
            }
            board.repair()?;
            save_board(&store, &board).await?;
            tracing::warn!(
                "Repaired {} ordering problems in {}",
                violations.len(),
                store.location()
            );
        }

        let focus = board.initial_focus();
        Ok(Self {
            board,
            store,
            placement: AddPlacement::default(),
            focus,
            unsaved: false,
            finished: false,
        })
    }

    pub fn with_placement(mut self, placement: AddPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn focus(&self) -> Option<FocusRef> {
        self.focus
    }

    /// Set after `Quit`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while the last save attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Run one command to completion.
    ///
    /// Validation and lookup errors are returned before anything changes.
    /// A storage error means the command was applied and rendered but not
    /// persisted.
    pub async fn execute(
        &mut self,
        command: LogicalCommand,
        sink: &mut dyn RenderSink,
    ) -> TaskboardResult<CommandOutcome> {
        tracing::debug!("Executing {:?}", command);

        let outcome = match command {
            LogicalCommand::Quit => {
                self.finished = true;
                return Ok(CommandOutcome::unchanged(self.focus));
            }
            LogicalCommand::Show => CommandOutcome {
                changed: false,
                redraw: (0..self.board.columns().len()).collect(),
                focus: self.focus,
            },
            other => self.apply(other)?,
        };

        self.board.resort();
        if let Some(focus) = outcome.focus {
            self.focus = Some(focus);
        }
        if self.focus.and_then(|f| self.board.card_at(f)).is_none() {
            self.focus = self.board.initial_focus();
        }

        let saved = if outcome.changed || self.unsaved {
            self.persist().await
        } else {
            Ok(())
        };

        self.notify(&outcome, sink);
        saved.map(|_| CommandOutcome {
            focus: self.focus,
            ..outcome
        })
    }

    fn apply(&mut self, command: LogicalCommand) -> TaskboardResult<CommandOutcome> {
        match command {
            LogicalCommand::Add {
                name,
                description,
                column,
            } => self
                .board
                .add_card(name, description, column, self.placement),
            LogicalCommand::Edit {
                column,
                position,
                name,
                description,
            } => self
                .board
                .edit_card(FocusRef::new(column, position), name, description),
            LogicalCommand::Delete { column, position } => {
                self.board.delete_card(FocusRef::new(column, position))
            }
            LogicalCommand::MoveUp { column, position } => self
                .board
                .move_card_within_column(FocusRef::new(column, position), VerticalDirection::Up),
            LogicalCommand::MoveDown { column, position } => self.board.move_card_within_column(
                FocusRef::new(column, position),
                VerticalDirection::Down,
            ),
            LogicalCommand::MoveLeft { column, position } => self
                .board
                .move_card_across_columns(FocusRef::new(column, position), MoveDirection::Left),
            LogicalCommand::MoveRight { column, position } => self
                .board
                .move_card_across_columns(FocusRef::new(column, position), MoveDirection::Right),
            LogicalCommand::Show | LogicalCommand::Quit => {
                Ok(CommandOutcome::unchanged(self.focus))
            }
        }
    }

    async fn persist(&mut self) -> TaskboardResult<()> {
        match save_board(&self.store, &self.board).await {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                tracing::warn!(
                    "Save to {} failed, keeping changes in memory: {}",
                    self.store.location(),
                    e
                );
                Err(e)
            }
        }
    }

    fn notify(&self, outcome: &CommandOutcome, sink: &mut dyn RenderSink) {
        for &column in &outcome.redraw {
            let Some(name) = self.board.columns().name(column) else {
                continue;
            };
            sink.redraw_column(column, name, &self.board.column_cards(column));
        }
        sink.set_focus(self.focus);
    }
}
