//! UCI command parsing.

#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(usize),
    SetOption(Vec<String>),
    Stop,
    Quit,
    Unknown(String),
}

#[derive(Default, Debug, Clone)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub movestogo: Option<u64>,
    pub depth: Option<u32>,
    pub infinite: bool,
}

#[inline]
fn parse_next<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse::<T>().ok())
}

#[must_use]
pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < parts.len() {
        let consumed = match parts[i] {
            "wtime" => {
                params.wtime = parse_next(parts, i);
                2
            }
            "btime" => {
                params.btime = parse_next(parts, i);
                2
            }
            "winc" => {
                params.winc = parse_next(parts, i);
                2
            }
            "binc" => {
                params.binc = parse_next(parts, i);
                2
            }
            "movetime" => {
                params.movetime = parse_next(parts, i);
                2
            }
            "movestogo" => {
                params.movestogo = parse_next(parts, i);
                2
            }
            "depth" => {
                params.depth = parse_next(parts, i);
                2
            }
            "infinite" => {
                params.infinite = true;
                1
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    let owned_parts = || {
        parts
            .iter()
            .map(|p| (*p).to_string())
            .collect::<Vec<String>>()
    };

    let cmd = match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts
                .get(1)
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => UciCommand::SetOption(owned_parts()),
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert!(matches!(parse_uci_command("uci"), Some(UciCommand::Uci)));
        assert!(matches!(
            parse_uci_command("isready"),
            Some(UciCommand::IsReady)
        ));
        assert!(matches!(parse_uci_command("stop"), Some(UciCommand::Stop)));
        assert!(matches!(parse_uci_command("quit"), Some(UciCommand::Quit)));
        assert!(matches!(
            parse_uci_command("  uci  "),
            Some(UciCommand::Uci)
        ));
        assert!(parse_uci_command("").is_none());
        assert!(matches!(
            parse_uci_command("foobar"),
            Some(UciCommand::Unknown(_))
        ));
    }

    #[test]
    fn parses_position_command_parts() {
        let cmd = parse_uci_command("position startpos moves e2e4 e7e5");
        match cmd {
            Some(UciCommand::Position(parts)) => {
                assert_eq!(parts.len(), 5);
                assert_eq!(parts[1], "startpos");
                assert_eq!(parts[4], "e7e5");
            }
            _ => panic!("expected position command"),
        }
    }

    #[test]
    fn parses_go_clock_params() {
        let parts = vec![
            "go", "wtime", "300000", "btime", "290000", "winc", "3000", "binc", "3000",
            "movestogo", "40",
        ];
        let params = parse_go_params(&parts);
        assert_eq!(params.wtime, Some(300_000));
        assert_eq!(params.btime, Some(290_000));
        assert_eq!(params.winc, Some(3000));
        assert_eq!(params.binc, Some(3000));
        assert_eq!(params.movestogo, Some(40));
        assert!(!params.infinite);
    }

    #[test]
    fn parses_go_depth_and_movetime() {
        let params = parse_go_params(&["go", "depth", "10"]);
        assert_eq!(params.depth, Some(10));

        let params = parse_go_params(&["go", "movetime", "5000"]);
        assert_eq!(params.movetime, Some(5000));

        let params = parse_go_params(&["go", "infinite"]);
        assert!(params.infinite);
    }

    #[test]
    fn go_params_tolerate_garbage() {
        let params = parse_go_params(&["go", "depth", "invalid"]);
        assert!(params.depth.is_none());

        let params = parse_go_params(&["go", "unknownparam", "depth", "10"]);
        assert_eq!(params.depth, Some(10));
    }

    #[test]
    fn perft_defaults_to_one() {
        match parse_uci_command("perft") {
            Some(UciCommand::Perft(depth)) => assert_eq!(depth, 1),
            _ => panic!("expected perft command"),
        }
        match parse_uci_command("perft 5") {
            Some(UciCommand::Perft(depth)) => assert_eq!(depth, 5),
            _ => panic!("expected perft command"),
        }
    }
}
