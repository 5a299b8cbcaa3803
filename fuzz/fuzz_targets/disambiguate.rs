#![no_main]

use cub::disambiguate::{disambiguate_expression, disambiguate_new, disambiguate_statement};
use cub::lexer::{Scanner, lex};
use cub::outline::outline;
use cub::reader::Reader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tokens) = lex(s) else {
        return;
    };

    // Every entry point must leave the full token stream replayable.
    for entry in 0..3 {
        let mut reader = Reader::new(tokens.clone().into_iter());
        {
            let mut look = reader.lookahead();
            match entry {
                0 => {
                    let _ = disambiguate_statement(&mut look);
                }
                1 => {
                    let _ = disambiguate_expression(&mut look);
                }
                _ => {
                    let _ = disambiguate_new(&mut look);
                }
            }
        }
        assert_eq!(reader.collect::<Vec<_>>(), tokens);
    }

    let _ = outline(&mut Reader::new(Scanner::new(s.chars())));
});
