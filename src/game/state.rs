//! The game orchestrator
//!
//! [`Game`] owns the position (pieces and attack-board placements), the side
//! to move, the status, the history and the undo stack. It is the only
//! writer: every action is validated against a read-only
//! [`BoardState`] first and committed in one step only when it succeeds, so a
//! rejected action never touches the game.
//!
//! After each completed action the record is appended, the turn passes
//! (except after [`Game::promote`]) and the status is recomputed.

use tracing::{debug, info};
use tri_engine::attack_board::{execute_board_move, legal_pins_for_board};
use tri_engine::castling::{execute_castle, get_castling_options};
use tri_engine::move_gen::legal::{
    get_legal_moves_avoiding_check, simulate_move, validate_legal_move,
};
use tri_engine::promotion::{apply_promotion, ready_promotions, resolve_promotion};
use tri_engine::setup::initial_pieces;
use tri_engine::{
    ArrivalChoice, AttackBoardId, AttackBoards, BoardMoveRejection, BoardMoveRequest,
    BoardState, CastleSide, Color, EngineError, MoveRejection, Piece, PieceId, PieceKind, PinId,
    PromotionOutcome, PromotionState, Square, World,
};

use super::error::{GameError, GameResult};
use super::history::{MoveHistory, MoveRecord};
use super::selection::{ClickOutcome, Selection};
use super::status::GameStatus;

/// A piece move as requested by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting_to(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }
}

/// Everything an undo has to put back
#[derive(Debug, Clone)]
struct Position {
    pieces: Vec<Piece>,
    boards: AttackBoards,
    turn: Color,
    status: GameStatus,
    history_len: usize,
    activated_this_turn: Vec<AttackBoardId>,
}

#[derive(Debug, Clone)]
pub struct Game {
    world: World,
    pieces: Vec<Piece>,
    boards: AttackBoards,
    turn: Color,
    status: GameStatus,
    history: MoveHistory,
    undo_stack: Vec<Position>,
    activated_this_turn: Vec<AttackBoardId>,
    selection: Selection,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let mut game = Game {
            world: World::new(),
            pieces: initial_pieces(),
            boards: AttackBoards::home(),
            turn: Color::White,
            status: GameStatus::default(),
            history: MoveHistory::default(),
            undo_stack: Vec::new(),
            activated_this_turn: Vec::new(),
            selection: Selection::None,
        };
        game.refresh_status();
        game
    }

    /// Rebuild a game from already validated parts, with an empty undo stack
    pub(crate) fn from_parts(
        pieces: Vec<Piece>,
        boards: AttackBoards,
        turn: Color,
        history: MoveHistory,
    ) -> Self {
        let mut game = Game {
            world: World::new(),
            pieces,
            boards,
            turn,
            status: GameStatus::default(),
            history,
            undo_stack: Vec::new(),
            activated_this_turn: Vec::new(),
            selection: Selection::None,
        };
        game.refresh_status();
        game
    }

    /// Back to the initial position
    pub fn reset_game(&mut self) {
        *self = Game::new();
        info!("game reset");
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn board_state(&self) -> BoardState<'_> {
        BoardState::new(&self.world, &self.boards, &self.pieces)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn boards(&self) -> &AttackBoards {
        &self.boards
    }

    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_check(&self) -> bool {
        self.status.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.status.is_checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.status.is_stalemate
    }

    pub fn winner(&self) -> Option<Color> {
        self.status.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.status.game_over
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn piece(&self, id: PieceId) -> GameResult<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::IllegalState(EngineError::UnknownPiece { id: id.0 }))
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board_state().piece_at(square)
    }

    /// Parse a square id and check that it exists
    pub fn parse_square(&self, id: &str) -> GameResult<Square> {
        Ok(self.world.parse_square(id)?)
    }

    pub fn square_of(&self, id: PieceId) -> GameResult<Square> {
        let piece = self.piece(id)?;
        Ok(self.board_state().square_of(piece))
    }

    /// Check-filtered destinations of a piece, whoever's turn it is
    pub fn legal_destinations(&self, id: PieceId) -> GameResult<Vec<Square>> {
        let piece = self.piece(id)?;
        Ok(get_legal_moves_avoiding_check(piece, &self.board_state()))
    }

    /// Pins the side to move could send `board` to
    pub fn legal_pins_for_board(&self, board: AttackBoardId) -> Vec<PinId> {
        legal_pins_for_board(board, self.turn, &self.board_state())
    }

    pub fn castling_options(&self) -> Vec<CastleSide> {
        get_castling_options(self.turn, &self.board_state(), self.board_activated(self.turn))
    }

    /// Deferred promotions of the side to move that must be taken now
    pub fn pending_promotions(&self) -> Vec<PieceId> {
        ready_promotions(self.turn, &self.board_state())
    }

    fn board_activated(&self, color: Color) -> bool {
        self.activated_this_turn.iter().any(|b| b.owner() == color)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Common gate: game running, right colour, no promotion waiting
    fn ensure_can_act(&self, color: Color) -> GameResult<()> {
        if self.status.game_over {
            return Err(GameError::GameOver);
        }
        if color != self.turn {
            return Err(GameError::NotYourTurn);
        }
        if !self.pending_promotions().is_empty() {
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    pub fn move_piece(&mut self, request: MoveRequest) -> GameResult<MoveRecord> {
        let state = self.board_state();
        let piece = *state
            .piece_at(request.from)
            .ok_or(GameError::NoPieceAt {
                square: request.from,
            })?;
        self.ensure_can_act(piece.color)?;
        validate_legal_move(&piece, request.to, &state)?;

        let captured = state.piece_at(request.to).map(|p| p.kind);
        let mut after = simulate_move(&piece, request.to, &state);
        for p in after.iter_mut() {
            p.moved_as_passenger = false;
            if p.id == piece.id {
                p.has_moved = true;
                p.promotion_state = None;
            }
        }

        let outcome = {
            let after_state = state.with_pieces(&after);
            let moved = after_state
                .find_piece(piece.id)
                .ok_or(GameError::IllegalState(EngineError::UnknownPiece { id: piece.id.0 }))?;
            if piece.kind == PieceKind::Pawn {
                resolve_promotion(moved, request.promotion, &after_state)?
            } else if request.promotion.is_some() {
                return Err(MoveRejection::NotPromotable.into());
            } else {
                PromotionOutcome::None
            }
        };

        let promotion = match outcome {
            PromotionOutcome::Promote(kind) => {
                apply_promotion(&mut after, piece.id, kind)?;
                Some(kind)
            }
            PromotionOutcome::Defer => {
                if let Some(pawn) = after.iter_mut().find(|p| p.id == piece.id) {
                    pawn.promotion_state = Some(PromotionState::Deferred);
                }
                debug!(piece = %piece.id, to = %request.to, "promotion deferred by overhang");
                None
            }
            PromotionOutcome::None => None,
        };

        let record = MoveRecord::Piece {
            piece_id: piece.id,
            piece: piece.kind,
            color: piece.color,
            from: request.from,
            to: request.to,
            captured,
            promotion,
        };
        self.commit(after, self.boards, record.clone(), true);
        info!(%record, "piece moved");
        Ok(record)
    }

    pub fn move_board(&mut self, request: BoardMoveRequest) -> GameResult<MoveRecord> {
        let mover = self.turn;
        self.ensure_can_act(mover)?;
        let outcome = execute_board_move(&request, mover, &self.board_state())?;

        let record = MoveRecord::Board {
            board_id: request.board,
            color: mover,
            from: outcome.from.pin,
            to: outcome.to.pin,
            rotation: (outcome.to.rotation != outcome.from.rotation)
                .then_some(outcome.to.rotation),
        };
        self.activated_this_turn.push(request.board);
        self.commit(outcome.pieces, outcome.boards, record.clone(), true);
        info!(%record, instance = %outcome.to.instance_id(), "attack board moved");
        Ok(record)
    }

    pub fn castle(&mut self, side: CastleSide) -> GameResult<MoveRecord> {
        let color = self.turn;
        self.ensure_can_act(color)?;
        let (plan, pieces) = execute_castle(
            color,
            side,
            &self.board_state(),
            self.board_activated(color),
        )?;

        let record = MoveRecord::Castle {
            color: plan.color,
            side: plan.side,
        };
        self.commit(pieces, self.boards, record.clone(), true);
        info!(%record, "castled");
        Ok(record)
    }

    /// Take a deferred promotion whose overhang has cleared
    ///
    /// Does not pass the turn.
    pub fn promote(&mut self, id: PieceId, kind: PieceKind) -> GameResult<MoveRecord> {
        if self.status.game_over {
            return Err(GameError::GameOver);
        }
        let color = self.piece(id)?.color;
        if color != self.turn {
            return Err(GameError::NotYourTurn);
        }
        if !self.pending_promotions().contains(&id) {
            return Err(MoveRejection::NotPromotable.into());
        }

        let mut pieces = self.pieces.clone();
        apply_promotion(&mut pieces, id, kind)?;
        let record = MoveRecord::Promotion {
            piece_id: id,
            color,
            promoted_to: kind,
        };
        self.commit(pieces, self.boards, record.clone(), false);
        info!(%record, "deferred promotion taken");
        Ok(record)
    }

    /// Restore the position before the last action
    pub fn undo(&mut self) -> GameResult<()> {
        let position = self.undo_stack.pop().ok_or(GameError::NothingToUndo)?;
        self.pieces = position.pieces;
        self.boards = position.boards;
        self.turn = position.turn;
        self.status = position.status;
        self.history.truncate(position.history_len);
        self.activated_this_turn = position.activated_this_turn;
        self.selection.clear();
        info!(turn = %self.turn, "move undone");
        Ok(())
    }

    fn commit(
        &mut self,
        pieces: Vec<Piece>,
        boards: AttackBoards,
        record: MoveRecord,
        end_turn: bool,
    ) {
        self.undo_stack.push(Position {
            pieces: std::mem::replace(&mut self.pieces, pieces),
            boards: self.boards,
            turn: self.turn,
            status: self.status,
            history_len: self.history.len(),
            activated_this_turn: self.activated_this_turn.clone(),
        });
        self.boards = boards;
        self.history.add_move(record);
        if end_turn {
            self.turn = self.turn.opposite();
            self.activated_this_turn.clear();
        }
        self.selection.clear();
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status = GameStatus::evaluate(self.turn, &self.board_state());
        if self.status.game_over {
            info!(status = %self.status.message(self.turn), "game over");
        }
    }

    /// Replay recorded actions from the initial position
    ///
    /// Used to rebuild a game whose undo stack was not kept, e.g. after a
    /// load. Board records carry only the resulting orientation, so the
    /// request is reconstructed from it.
    pub fn replay(records: &[MoveRecord]) -> GameResult<Game> {
        let mut game = Game::new();
        for record in records {
            match *record {
                MoveRecord::Piece {
                    from,
                    to,
                    promotion,
                    ..
                } => {
                    game.move_piece(MoveRequest { from, to, promotion })?;
                }
                MoveRecord::Board {
                    board_id,
                    from,
                    to,
                    rotation,
                    ..
                } => {
                    let turned = rotation.is_some();
                    let request = if from == to {
                        BoardMoveRequest::rotate_in_place(board_id, to)
                    } else if from.track() != to.track() {
                        let arrival = if turned {
                            ArrivalChoice::Rot180
                        } else {
                            ArrivalChoice::Identity
                        };
                        BoardMoveRequest::slide(board_id, to).with_arrival(arrival)
                    } else {
                        BoardMoveRequest {
                            rotate: turned,
                            ..BoardMoveRequest::slide(board_id, to)
                        }
                    };
                    game.move_board(request)?;
                }
                MoveRecord::Castle { side, .. } => {
                    game.castle(side)?;
                }
                MoveRecord::Promotion {
                    piece_id,
                    promoted_to,
                    ..
                } => {
                    game.promote(piece_id, promoted_to)?;
                }
            }
        }
        Ok(game)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Select a board of the side to move and list where it can go
    pub fn select_board(&mut self, board: AttackBoardId) -> GameResult<&[PinId]> {
        self.ensure_can_act(self.turn)?;
        let pins = self.legal_pins_for_board(board);
        self.selection = Selection::Board { board, pins };
        match &self.selection {
            Selection::Board { pins, .. } => Ok(pins),
            _ => Ok(&[]),
        }
    }

    /// A square was clicked: complete the selected move or select a piece
    pub fn handle_square_click(&mut self, square: Square) -> GameResult<ClickOutcome> {
        if let Selection::Piece {
            from, destinations, ..
        } = &self.selection
        {
            if destinations.contains(&square) {
                let request = MoveRequest::new(*from, square);
                return match self.move_piece(request) {
                    Ok(_) => Ok(ClickOutcome::Moved),
                    Err(GameError::InvalidMove(MoveRejection::PromotionChoiceRequired)) => {
                        Ok(ClickOutcome::ChoosePromotion {
                            from: request.from,
                            to: square,
                        })
                    }
                    Err(err) => Err(err),
                };
            }
        }

        let own = self
            .piece_at(square)
            .filter(|p| p.color == self.turn)
            .map(|p| p.id);
        match own {
            Some(id) => {
                self.ensure_can_act(self.turn)?;
                let destinations = self.legal_destinations(id)?;
                debug!(%square, moves = destinations.len(), "piece selected");
                self.selection = Selection::Piece {
                    id,
                    from: square,
                    destinations,
                };
                Ok(ClickOutcome::Selected)
            }
            None => {
                self.selection.clear();
                Ok(ClickOutcome::Cleared)
            }
        }
    }

    /// A pin was clicked: complete the selected board move or select the
    /// board standing on it
    pub fn handle_pin_click(&mut self, pin: PinId) -> GameResult<ClickOutcome> {
        if let Selection::Board { board, pins } = &self.selection {
            if pins.contains(&pin) {
                let board = *board;
                let current = self.boards.placement(board).pin;
                let request = BoardMoveRequest {
                    board,
                    to: pin,
                    rotate: pin == current,
                    arrival: None,
                };
                return match self.move_board(request) {
                    Ok(_) => Ok(ClickOutcome::Moved),
                    Err(GameError::InvalidBoardMove(BoardMoveRejection::AmbiguousArrival)) => {
                        Ok(ClickOutcome::ChooseArrival { board, to: pin })
                    }
                    Err(err) => Err(err),
                };
            }
        }

        match self.boards.board_at(pin) {
            Some(board) => {
                self.select_board(board)?;
                Ok(ClickOutcome::Selected)
            }
            None => {
                self.selection.clear();
                Ok(ClickOutcome::Cleared)
            }
        }
    }

    /// Finish a pending lateral transfer once the player picked an arrival
    pub fn complete_board_move(
        &mut self,
        board: AttackBoardId,
        to: PinId,
        arrival: ArrivalChoice,
    ) -> GameResult<MoveRecord> {
        self.move_board(BoardMoveRequest::slide(board, to).with_arrival(arrival))
    }
}
