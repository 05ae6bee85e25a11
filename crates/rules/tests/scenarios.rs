use rules::*;

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn world(text: &str) -> [i32; 2] {
    let square = sq(text);
    [square.file() as i32, square.rank() as i32]
}

fn piece(code: &str) -> Option<Piece> {
    Some(code.parse().unwrap())
}

fn play(game: &mut GameState, from: &str, to: &str) -> bool {
    game.select(world(from));
    game.move_to(world(to))
}

const POSITIONS: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
    "4k3/8/8/8/4q3/8/8/4K3",
    "r3k2r/pp3ppp/2n5/3qb3/8/2N2Q2/PPP2PPP/R3K2R",
    "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR",
    "4r1k1/8/8/8/8/8/3B4/R3K3",
    "3R2k1/5ppp/8/8/8/8/8/6K1",
];

#[test]
fn scenario_a_pawn_push_from_d2() {
    let mut game = GameState::new();
    game.select([3, 1]);
    assert!(game.paths().contains(&Square::new(3, 2)));
    assert!(game.paths().contains(&Square::new(3, 3)));

    assert!(game.move_to([3, 2]));
    assert_eq!(game.turn(), Side::Black);
    assert_eq!(game.board().get_piece(Square::new(3, 2)), piece("wP"));
    assert_eq!(game.board().get_piece(Square::new(3, 1)), None);
}

#[test]
fn scenario_b_queen_attacks_king() {
    let board = Board::from_layout("4k3/8/8/8/8/8/1q6/K7").unwrap();
    assert!(board.is_in_check(Side::White));
}

#[test]
fn scenario_c_queenside_castle() {
    let mut game = GameState::from_layout(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R3KBNR",
        Side::White,
        GameConfig::default(),
    )
    .unwrap();
    assert!(!game.check_status().get(Side::White));

    game.select(world("e1"));
    assert!(game.paths().contains(&sq("c1")));

    assert!(game.move_to(world("c1")));
    assert_eq!(game.board().get_piece(sq("c1")), piece("wK"));
    assert_eq!(game.board().get_piece(sq("d1")), piece("wR"));
    assert_eq!(game.board().get_piece(sq("a1")), None);
    assert_eq!(game.board().get_piece(sq("e1")), None);
    assert_eq!(game.turn(), Side::Black);
    assert!(!game.castle_rights().get(Side::White));
    assert!(game.drain_events().contains(&GameEvent::Castled {
        side: Side::White,
        wing: CastleWing::Queenside,
    }));
}

#[test]
fn scenario_d_select_empty_square() {
    let mut game = GameState::new();
    game.select(world("e4"));
    assert_eq!(game.selected(), None);
    assert!(game.paths().is_empty());
}

#[test]
fn castle_round_trip_on_both_wings() {
    let cleared = Board::from_layout("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R").unwrap();
    let flags = PositionFlags::default();

    for (side, wing, from, to, rook_to, rook_from) in [
        (Side::White, CastleWing::Kingside, "e1", "g1", "f1", "h1"),
        (Side::White, CastleWing::Queenside, "e1", "c1", "d1", "a1"),
        (Side::Black, CastleWing::Kingside, "e8", "g8", "f8", "h8"),
        (Side::Black, CastleWing::Queenside, "e8", "c8", "d8", "a8"),
    ] {
        let king = cleared.get_piece(sq(from)).unwrap();
        assert!(cleared.get_legal_moves(sq(from), king, side, &flags).contains(&sq(to)));

        let outcome = cleared.apply_move(sq(from), sq(to), &flags);
        assert_eq!(outcome.kind, MoveKind::Castle(wing));
        let king_to = sq(to);
        let rook_to = sq(rook_to);
        assert_eq!(outcome.board.get_piece(king_to), Some(king));
        assert_eq!(
            outcome.board.get_piece(rook_to),
            Some(Piece::new(side, PieceKind::Rook))
        );
        assert_eq!((king_to.file() as i8 - rook_to.file() as i8).abs(), 1);
        assert_eq!(outcome.board.get_piece(sq(from)), None);
        assert_eq!(outcome.board.get_piece(sq(rook_from)), None);
    }
}

#[test]
fn castle_with_missing_rook_is_skipped() {
    let mut game =
        GameState::from_layout("4k3/8/8/8/8/8/8/4K3", Side::White, GameConfig::default()).unwrap();
    let before = game.board().clone();

    game.select(world("e1"));
    assert!(game.paths().contains(&sq("g1")));
    assert!(!game.move_to(world("g1")));

    assert_eq!(game.board(), &before);
    assert_eq!(game.turn(), Side::White);
    assert_eq!(game.selected(), None);
    assert!(game.logger().log_buffer.contains("skipped: RookMissing"));
}

#[test]
fn check_matches_opposing_attack_sets() {
    for layout in POSITIONS {
        let board = Board::from_layout(layout).unwrap();
        for side in [Side::White, Side::Black] {
            let king = board.find_king(side).unwrap();
            let attacked = board
                .pieces_of(side.opposite())
                .any(|(square, p)| board.get_attack_squares(square, p, p.side).contains(&king));
            assert_eq!(board.is_in_check(side), attacked, "{layout} {side}");
        }
    }
}

#[test]
fn moves_in_check_never_leave_king_attacked() {
    for layout in POSITIONS {
        let board = Board::from_layout(layout).unwrap();
        for side in [Side::White, Side::Black] {
            if !board.is_in_check(side) {
                continue;
            }
            let flags = PositionFlags::new(
                CheckStatus::default().with(side, true),
                CastleRights::all(),
            );
            for (square, p) in board.pieces_of(side) {
                for to in board.get_legal_moves(square, p, side, &flags) {
                    let outcome = board.apply_move(square, to, &flags);
                    assert!(
                        !outcome.board.is_in_check(side),
                        "{layout}: {p} {square}-{to} leaves {side} in check"
                    );
                }
            }
        }
    }
}

#[test]
fn generated_moves_stay_on_board_and_off_own_pieces() {
    for layout in POSITIONS {
        let board = Board::from_layout(layout).unwrap();
        let flags = PositionFlags::default();
        for (square, p) in board.pieces() {
            for to in board.get_legal_moves(square, p, p.side, &flags) {
                assert!(to.file() < 8 && to.rank() < 8);
                assert!(!board.is_occupied_by(to, p.side));
            }
        }
    }
}

#[test]
fn turn_flips_once_per_committed_move() {
    let mut game = GameState::new();
    let script = [
        ("e2", "e4", true),
        ("e7", "e4", false),
        ("e7", "e5", true),
        ("g1", "g3", false),
        ("g1", "f3", true),
    ];
    let mut expected = Side::White;
    for (from, to, legal) in script {
        assert_eq!(play(&mut game, from, to), legal, "{from}-{to}");
        if legal {
            expected = expected.opposite();
        }
        assert_eq!(game.turn(), expected);
    }
}

#[test]
fn fools_mate_ends_the_game() {
    let mut game = GameState::new();
    assert!(play(&mut game, "f2", "f3"));
    assert!(play(&mut game, "e7", "e5"));
    assert!(play(&mut game, "g2", "g4"));
    assert!(play(&mut game, "d8", "h4"));

    assert_eq!(game.status(), GameStatus::Checkmate(Side::White));
    assert!(game
        .drain_events()
        .contains(&GameEvent::Checkmate { loser: Side::White }));
    assert!(game.logger().log_buffer.contains("Checkmate! Black wins"));

    game.select(world("e1"));
    assert_eq!(game.selected(), None);

    game.reset();
    assert_eq!(game.status(), GameStatus::InProgress);
    game.select(world("e2"));
    assert_eq!(game.selected(), Some(sq("e2")));
}

#[test]
fn snapshot_serializes_piece_codes() {
    let mut game = GameState::new();
    game.select(world("e2"));
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    assert!(json.contains("\"wK\""));
    assert!(json.contains("\"bQ\""));

    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game.snapshot());
}

#[test]
fn intents_decode_from_json() {
    let intents: Vec<Intent> = serde_json::from_str(
        r#"[{"intent":"select","square":[4,1]},{"intent":"move","square":[4,3]},{"intent":"unselect"}]"#,
    )
    .unwrap();
    assert_eq!(
        intents,
        vec![Intent::Select([4, 1]), Intent::Move([4, 3]), Intent::Unselect]
    );

    let mut game = GameState::new();
    for intent in intents {
        game.dispatch(intent);
    }
    assert_eq!(game.board().get_piece(sq("e4")), piece("wP"));
    assert_eq!(game.turn(), Side::Black);
}

#[test]
fn events_follow_the_game() {
    let mut game = GameState::new();
    assert_eq!(game.drain_events(), vec![GameEvent::GameStarted]);

    assert!(play(&mut game, "e2", "e4"));
    assert_eq!(
        game.drain_events(),
        vec![
            GameEvent::Selected { square: sq("e2"), piece: "wP".parse().unwrap() },
            GameEvent::Moved { from: sq("e2"), to: sq("e4"), piece: "wP".parse().unwrap() },
        ]
    );
}
