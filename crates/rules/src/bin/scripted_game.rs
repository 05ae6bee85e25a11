use rules::{GameConfig, GameState, Intent, Square};

// Fool's mate, the shortest game ending in checkmate.
const SCRIPT: [(&str, &str); 4] = [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];

fn world(text: &str) -> [i32; 2] {
    match text.parse::<Square>() {
        Ok(square) => [square.file() as i32, square.rank() as i32],
        Err(err) => panic!("bad square in script: {err}"),
    }
}

fn main() {
    let mut game = GameState::with_config(GameConfig::default().with_advanced_logging(true));

    println!("🎯 SCRIPTED GAME");
    println!("{}", "=".repeat(40));
    println!("{}\n", game.board());

    for (from, to) in SCRIPT {
        let mover = game.turn();
        game.dispatch(Intent::Select(world(from)));
        game.dispatch(Intent::Move(world(to)));

        println!("{} plays {}-{}", mover, from, to);
        println!("{}", game.board());
        for event in game.drain_events() {
            println!("  event: {:?}", event);
        }
        println!();
    }

    println!("Final status: {:?}", game.status());
    println!("{}", "=".repeat(40));
    print!("{}", game.logger().log_buffer);

    match game.logger_mut().save_to_file("scripted game finished") {
        Ok(path) => println!("💾 Log saved to {}", path),
        Err(err) => eprintln!("❌ {}", err),
    }
}
