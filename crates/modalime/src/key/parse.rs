//! Decoding of editor input streams.
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    multi::many0,
    number::complete::be_u8,
    sequence::{pair, preceded},
    IResult,
};

use crossterm::event::KeyCode;

use super::{DecodeError, EditorKey, VimEncoding, KE_FILLER, KS_SPECIAL, K_SPECIAL};

pub(crate) const VT_UP: &[u8] = b"\x1b[A";
pub(crate) const VT_DOWN: &[u8] = b"\x1b[B";
pub(crate) const VT_RIGHT: &[u8] = b"\x1b[C";
pub(crate) const VT_LEFT: &[u8] = b"\x1b[D";
pub(crate) const VT_HOME: &[u8] = b"\x1b[H";
pub(crate) const VT_END: &[u8] = b"\x1b[F";
pub(crate) const VT_DELETE: &[u8] = b"\x1b[3~";

const VIM_SPECIAL: &[u8] = &[K_SPECIAL];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    Key(KeyCode),
    Special(u8, u8),
    Byte(u8),
}

fn parse_vt_sequence(input: &[u8]) -> IResult<&[u8], Token> {
    alt((
        value(Token::Key(KeyCode::Up), tag(VT_UP)),
        value(Token::Key(KeyCode::Down), tag(VT_DOWN)),
        value(Token::Key(KeyCode::Right), tag(VT_RIGHT)),
        value(Token::Key(KeyCode::Left), tag(VT_LEFT)),
        value(Token::Key(KeyCode::Home), tag(VT_HOME)),
        value(Token::Key(KeyCode::End), tag(VT_END)),
        value(Token::Key(KeyCode::Delete), tag(VT_DELETE)),
    ))(input)
}

fn parse_byte(input: &[u8]) -> IResult<&[u8], Token> {
    map(be_u8, Token::Byte)(input)
}

fn parse_vt(input: &[u8]) -> IResult<&[u8], Vec<Token>> {
    many0(alt((parse_vt_sequence, parse_byte)))(input)
}

fn parse_vim_special(input: &[u8]) -> IResult<&[u8], Token> {
    let (input, (a, b)) = preceded(tag(VIM_SPECIAL), pair(be_u8, be_u8))(input)?;

    if a == KS_SPECIAL && b == KE_FILLER {
        return Ok((input, Token::Byte(K_SPECIAL)));
    }

    return Ok((input, Token::Special(a, b)));
}

fn parse_vim(input: &[u8]) -> IResult<&[u8], Vec<Token>> {
    many0(alt((parse_vim_special, parse_byte)))(input)
}

fn flush_text(buf: &mut Vec<u8>, keys: &mut Vec<EditorKey>) -> Result<(), DecodeError> {
    if buf.is_empty() {
        return Ok(());
    }

    let text = std::str::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8(buf.clone()))?;

    for c in text.chars() {
        let key = EditorKey::from_control(c).unwrap_or_else(|| EditorKey::from(c));
        keys.push(key);
    }

    buf.clear();

    return Ok(());
}

fn assemble(tokens: Vec<Token>) -> Result<Vec<EditorKey>, DecodeError> {
    let mut keys = vec![];
    let mut buf = vec![];

    for token in tokens {
        match token {
            Token::Byte(b) => {
                buf.push(b);
            },
            Token::Key(code) => {
                flush_text(&mut buf, &mut keys)?;
                keys.push(code.into());
            },
            Token::Special(a, b) => {
                flush_text(&mut buf, &mut keys)?;

                let code =
                    VimEncoding::from_termcap([a, b]).ok_or(DecodeError::UnknownSpecial(a, b))?;
                keys.push(code.into());
            },
        }
    }

    flush_text(&mut buf, &mut keys)?;

    return Ok(keys);
}

/// Decode a VT-style input stream.
pub fn decode_vt(bytes: &[u8]) -> Result<Vec<EditorKey>, DecodeError> {
    match parse_vt(bytes) {
        Ok((_, tokens)) => assemble(tokens),
        Err(_) => Err(DecodeError::InvalidUtf8(bytes.to_vec())),
    }
}

/// Decode the contents of a Vim input buffer.
pub fn decode_vim(bytes: &[u8]) -> Result<Vec<EditorKey>, DecodeError> {
    match parse_vim(bytes) {
        Ok((_, tokens)) => assemble(tokens),
        Err(_) => Err(DecodeError::InvalidUtf8(bytes.to_vec())),
    }
}
