use itertools::PeekingNext;

use crate::grammar::Symbol;

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Symbol(Symbol),
    // A character the symbol model does not accept
    Rejected(char)
}

pub fn lex_arrow(line: &mut impl PeekingNext<Item = char>) -> Token {
    line.next(); // Consume `-`
    match line.peeking_next(|&c| c == '>') {
        Some(_) => Token::Arrow,
        None => Token::Rejected('-')
    }
}

pub fn lex_symbol(c: char) -> Token {
    match Symbol::classify_char(c) {
        Ok(symbol) => Token::Symbol(symbol),
        Err(_) => Token::Rejected(c)
    }
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '-' {
            tokens.push(lex_arrow(&mut line_chars));
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if !c.is_whitespace() {
            line_chars.next();
            tokens.push(lex_symbol(c));
        } else {
            line_chars.next();
        }
    }

    return tokens;
}
