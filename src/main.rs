//! UCI front-end loop.

use std::io::{self, BufRead, Write};

use argent::engine::Engine;
use argent::uci::command::{parse_go_params, parse_uci_command, UciCommand};
use argent::uci::{parse_position_command, print};

const DEFAULT_HASH_MB: usize = 16;

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut engine = Engine::new(DEFAULT_HASH_MB);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_uci_command(&line) else {
            continue;
        };

        match cmd {
            UciCommand::Uci => print::print_identity(),
            UciCommand::IsReady => print::print_ready(),
            UciCommand::UciNewGame => engine.new_game(),
            UciCommand::Position(parts) => {
                engine.stop_search();
                let parts_ref: Vec<&str> = parts.iter().map(String::as_str).collect();
                parse_position_command(engine.board_mut(), &parts_ref);
            }
            UciCommand::Go(parts) => {
                let parts_ref: Vec<&str> = parts.iter().map(String::as_str).collect();
                let params = parse_go_params(&parts_ref);
                engine.go(&params);
            }
            UciCommand::Perft(depth) => {
                let nodes = engine.board().perft(depth);
                println!("perft {depth}: {nodes}");
            }
            UciCommand::SetOption(parts) => handle_setoption(&mut engine, &parts),
            UciCommand::Stop => engine.signal_stop(),
            UciCommand::Quit => {
                engine.stop_search();
                break;
            }
            UciCommand::Unknown(text) => eprintln!("unknown command: {text}"),
        }

        let _ = stdout.flush();
    }
}

fn handle_setoption(engine: &mut Engine, parts: &[String]) {
    // setoption name <id> value <x>
    let mut name = None;
    let mut value = None;
    let mut i = 1;
    while i < parts.len() {
        match parts[i].as_str() {
            "name" => name = parts.get(i + 1).map(String::as_str),
            "value" => value = parts.get(i + 1).map(String::as_str),
            _ => {}
        }
        i += 2;
    }
    match (name, value) {
        (Some("Hash"), Some(mb)) => {
            if let Ok(mb) = mb.parse::<usize>() {
                engine.resize_hash(mb.clamp(1, 4096));
            }
        }
        _ => eprintln!("unsupported option"),
    }
}
