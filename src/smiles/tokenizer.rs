use crate::element::Element;
use crate::smiles::error::SmilesError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Atom(AtomToken),
    Bond(BondToken, usize),
    Ring {
        bond: Option<BondToken>,
        number: u16,
        pos: usize,
    },
    Open(usize),
    Close(usize),
    Dot(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomToken {
    pub element: Element,
    pub is_aromatic: bool,
    pub isotope: u16,
    /// `Some` only for bracket atoms, where the count is explicit.
    pub hcount: Option<u8>,
    pub charge: i8,
    pub atom_class: u16,
    pub pos: usize,
}

impl AtomToken {
    fn bare(element: Element, is_aromatic: bool, pos: usize) -> Self {
        Self {
            element,
            is_aromatic,
            isotope: 0,
            hcount: None,
            charge: 0,
            atom_class: 0,
            pos,
        }
    }

    pub fn is_bracket(&self) -> bool {
        self.hcount.is_some()
    }
}

/// Bond symbols. Directional bonds (`/`, `\`) only carry double-bond
/// geometry, which is dropped, so they read as plain single bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Single,
    Double,
    Triple,
    Aromatic,
}

const ORGANIC_TWO_LETTER: [(&str, Element); 2] = [("Cl", Element::Cl), ("Br", Element::Br)];

const AROMATIC_BRACKET: [(&str, Element); 9] = [
    ("se", Element::Se),
    ("te", Element::Te),
    ("as", Element::As),
    ("b", Element::B),
    ("c", Element::C),
    ("n", Element::N),
    ("o", Element::O),
    ("p", Element::P),
    ("s", Element::S),
];

const CHIRAL_CLASSES: [&str; 5] = ["TH", "AL", "SP", "TB", "OH"];

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Reads a run of ASCII digits, `None` when there are none.
    fn number(&mut self) -> Option<u32> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let text = &self.rest()[..digits];
        self.pos += digits;
        Some(text.bytes().fold(0u32, |acc, d| {
            acc.saturating_mul(10).saturating_add((d - b'0') as u32)
        }))
    }

    fn unexpected(&self) -> SmilesError {
        match self.peek() {
            Some(ch) => SmilesError::UnexpectedChar { pos: self.pos, ch },
            None => SmilesError::UnexpectedEnd,
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SmilesError> {
    let mut sc = Scanner::new(input);
    let mut tokens = Vec::new();
    let mut pending: Option<(BondToken, usize)> = None;

    while let Some(c) = sc.peek() {
        let pos = sc.pos;
        match c {
            '[' => {
                flush_bond(&mut tokens, &mut pending);
                tokens.push(Token::Atom(bracket_atom(&mut sc)?));
            }
            '-' | '=' | '#' | ':' | '/' | '\\' => {
                sc.bump();
                if pending.is_some() {
                    return Err(SmilesError::UnexpectedChar { pos, ch: c });
                }
                let bond = match c {
                    '=' => BondToken::Double,
                    '#' => BondToken::Triple,
                    ':' => BondToken::Aromatic,
                    _ => BondToken::Single,
                };
                pending = Some((bond, pos));
            }
            '0'..='9' | '%' => {
                let number = if sc.eat('%') {
                    let start = sc.pos;
                    let two = sc.rest().get(..2).filter(|d| d.bytes().all(|b| b.is_ascii_digit()));
                    let Some(two) = two else {
                        return Err(SmilesError::UnexpectedChar { pos, ch: '%' });
                    };
                    sc.pos = start + 2;
                    two.parse::<u16>().map_err(|_| SmilesError::UnexpectedChar { pos, ch: '%' })?
                } else {
                    sc.bump();
                    c as u16 - '0' as u16
                };
                tokens.push(Token::Ring {
                    bond: pending.take().map(|(b, _)| b),
                    number,
                    pos,
                });
            }
            '(' => {
                sc.bump();
                flush_bond(&mut tokens, &mut pending);
                tokens.push(Token::Open(pos));
            }
            ')' => {
                sc.bump();
                flush_bond(&mut tokens, &mut pending);
                tokens.push(Token::Close(pos));
            }
            '.' => {
                sc.bump();
                flush_bond(&mut tokens, &mut pending);
                tokens.push(Token::Dot(pos));
            }
            ' ' | '\t' | '\r' | '\n' => {
                sc.bump();
            }
            _ => {
                let atom = organic_atom(&mut sc).ok_or_else(|| sc.unexpected())?;
                flush_bond(&mut tokens, &mut pending);
                tokens.push(Token::Atom(atom));
            }
        }
    }
    flush_bond(&mut tokens, &mut pending);
    Ok(tokens)
}

fn flush_bond(tokens: &mut Vec<Token>, pending: &mut Option<(BondToken, usize)>) {
    if let Some((bond, pos)) = pending.take() {
        tokens.push(Token::Bond(bond, pos));
    }
}

fn organic_atom(sc: &mut Scanner<'_>) -> Option<AtomToken> {
    let pos = sc.pos;
    for (sym, elem) in ORGANIC_TWO_LETTER {
        if sc.eat_str(sym) {
            return Some(AtomToken::bare(elem, false, pos));
        }
    }
    let (elem, aromatic) = match sc.peek()? {
        'B' => (Element::B, false),
        'C' => (Element::C, false),
        'N' => (Element::N, false),
        'O' => (Element::O, false),
        'P' => (Element::P, false),
        'S' => (Element::S, false),
        'F' => (Element::F, false),
        'I' => (Element::I, false),
        'b' => (Element::B, true),
        'c' => (Element::C, true),
        'n' => (Element::N, true),
        'o' => (Element::O, true),
        'p' => (Element::P, true),
        's' => (Element::S, true),
        _ => return None,
    };
    sc.bump();
    Some(AtomToken::bare(elem, aromatic, pos))
}

fn bracket_atom(sc: &mut Scanner<'_>) -> Result<AtomToken, SmilesError> {
    let start = sc.pos;
    sc.bump();

    let isotope = match sc.number() {
        Some(n) => u16::try_from(n).map_err(|_| SmilesError::InvalidIsotope { pos: start })?,
        None => 0,
    };
    let (element, is_aromatic) = bracket_element(sc)?;
    skip_chirality(sc);

    let hcount = if sc.eat('H') {
        match sc.number() {
            Some(n) => u8::try_from(n).map_err(|_| sc.unexpected())?,
            None => 1,
        }
    } else {
        0
    };

    let charge = bracket_charge(sc, start)?;

    let atom_class = if sc.eat(':') {
        let n = sc.number().ok_or_else(|| sc.unexpected())?;
        u16::try_from(n).map_err(|_| SmilesError::InvalidAtomClass { pos: start })?
    } else {
        0
    };

    if !sc.eat(']') {
        return Err(match sc.peek() {
            None => SmilesError::UnclosedBracket { pos: start },
            Some(_) => sc.unexpected(),
        });
    }

    Ok(AtomToken {
        element,
        is_aromatic,
        isotope,
        hcount: Some(hcount),
        charge,
        atom_class,
        pos: start,
    })
}

fn bracket_element(sc: &mut Scanner<'_>) -> Result<(Element, bool), SmilesError> {
    let pos = sc.pos;
    for (sym, elem) in AROMATIC_BRACKET {
        if sc.eat_str(sym) {
            return Ok((elem, true));
        }
    }
    let rest = sc.rest();
    let mut chars = rest.chars();
    let Some(first) = chars.next().filter(char::is_ascii_uppercase) else {
        return Err(match rest.chars().next() {
            None => SmilesError::UnclosedBracket { pos },
            Some(c) => SmilesError::InvalidElement {
                pos,
                text: c.to_string(),
            },
        });
    };
    if let Some(second) = chars.next().filter(char::is_ascii_lowercase) {
        let sym: String = [first, second].iter().collect();
        if let Some(elem) = Element::from_symbol(&sym) {
            sc.pos += 2;
            return Ok((elem, false));
        }
    }
    match Element::from_symbol(&first.to_string()) {
        Some(elem) => {
            sc.pos += 1;
            Ok((elem, false))
        }
        None => Err(SmilesError::InvalidElement {
            pos,
            text: rest.chars().take_while(char::is_ascii_alphabetic).collect(),
        }),
    }
}

/// Consumes `@`, `@@` and the `@TH1` family of chirality marks.
fn skip_chirality(sc: &mut Scanner<'_>) {
    if !sc.eat('@') {
        return;
    }
    if sc.eat('@') {
        return;
    }
    for class in CHIRAL_CLASSES {
        if sc.rest().starts_with(class)
            && sc.rest()[class.len()..].starts_with(|c: char| c.is_ascii_digit())
        {
            sc.pos += class.len();
            sc.number();
            return;
        }
    }
}

fn bracket_charge(sc: &mut Scanner<'_>, start: usize) -> Result<i8, SmilesError> {
    let sign: i32 = match sc.peek() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(0),
    };
    let symbol = if sign > 0 { '+' } else { '-' };
    sc.bump();
    let magnitude = match sc.number() {
        Some(n) => n as i32,
        None => {
            let mut count = 1;
            while sc.eat(symbol) {
                count += 1;
            }
            count
        }
    };
    i8::try_from(sign * magnitude).map_err(|_| SmilesError::InvalidCharge { pos: start })
}
