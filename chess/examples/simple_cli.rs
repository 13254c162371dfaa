// Simple command-line application to play chess against yourself

use chessrules::{
    board::PrettyStyle, chain::NumberPolicy, types::OutcomeFilter, Color, Move, MoveChain,
};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    let mut stdin = io::stdin().lock();

    let mut chain = MoveChain::new_initial();

    loop {
        if let Some(outcome) = chain.outcome() {
            println!("Game finished: {} ({:?})", outcome, outcome);
            println!("Notation:");
            println!("{}", chain.san_list(NumberPolicy::FromBoard));
            break;
        }

        println!("{}", chain.last().pretty(PrettyStyle::Ascii));
        let side = match chain.last().side() {
            Color::White => "White",
            Color::Black => "Black",
        };
        print!("{} move ({}): ", side, chain.last().move_number());
        io::stdout().flush()?;
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }
        let s = s.trim();

        // `MoveChain::push_san()` would do both steps at once. Parse first to show the move
        // details before making it.
        let info = match Move::from_san(s, chain.last()) {
            Ok(mv) => mv.info(chain.last()),
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };
        let info = match info {
            Ok(info) => info,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };
        println!("{} ({}), flags: {:?}", info.san, info.mv, info.flags());

        if let Err(e) = chain.push(info.mv) {
            println!("Cannot make move: {}", e);
        }
        println!();

        chain.set_auto_outcome(OutcomeFilter::Strict);
    }

    Ok(())
}
