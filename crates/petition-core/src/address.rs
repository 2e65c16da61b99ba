//! Free-text address → administrative area.
//!
//! Addresses are typed by hand ("Desa Sukamaju, Kec. Cibinong, Kab. Bogor").
//! The first keyword followed by a name that runs to a comma or the end of
//! the text wins. Names are title-cased.

use winnow::ascii::Caseless;
use winnow::combinator::{alt, eof, preceded};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Result for an empty address.
pub const UNKNOWN_AREA: &str = "Tidak Diketahui";

/// Result when no recognized keyword is present.
pub const OTHER_AREA: &str = "Lainnya";

/// Regency (`Kabupaten` / `Kab.`) or city (`Kota`) of an address.
pub fn parse_regency(address: &str) -> String {
    if address.is_empty() {
        return UNKNOWN_AREA.to_string();
    }
    if let Some(name) = find_named(address, regency_keyword) {
        return format!("Kab. {}", title_case(name.trim()));
    }
    if let Some(name) = find_named(address, city_keyword) {
        return format!("Kota {}", title_case(name.trim()));
    }
    OTHER_AREA.to_string()
}

/// Village (`Desa` / `Ds.`) of an address.
pub fn parse_village(address: &str) -> String {
    if address.is_empty() {
        return UNKNOWN_AREA.to_string();
    }
    match find_named(address, village_keyword) {
        Some(name) => format!("Desa {}", title_case(name.trim())),
        None => OTHER_AREA.to_string(),
    }
}

fn regency_keyword(input: &mut &str) -> ModalResult<()> {
    alt((Caseless("kabupaten"), Caseless("kab."))).void().parse_next(input)
}

fn city_keyword(input: &mut &str) -> ModalResult<()> {
    Caseless("kota").void().parse_next(input)
}

fn village_keyword(input: &mut &str) -> ModalResult<()> {
    alt((Caseless("desa"), Caseless("ds."))).void().parse_next(input)
}

/// One whitespace separator, then a run of word/space characters ending at
/// `,` or EOF. The run may be blank ("Kab.  , ..."); callers trim it.
fn place_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    let name = preceded(
        one_of(|c: char| c.is_whitespace()),
        take_while(1.., |c: char| is_word_char(c) || c.is_whitespace()),
    )
    .parse_next(input)?;
    alt((",".void(), eof.void())).parse_next(input)?;
    Ok(name)
}

/// Try `keyword place_name` at every character offset, leftmost match first.
fn find_named<'a>(
    address: &'a str,
    mut keyword: impl FnMut(&mut &str) -> ModalResult<()>,
) -> Option<&'a str> {
    address.char_indices().find_map(|(offset, _)| {
        let mut rest = &address[offset..];
        keyword(&mut rest).ok()?;
        place_name.parse_next(&mut rest).ok()
    })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Uppercase the first character of every word; leave the rest untouched.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let word = is_word_char(c);
        if word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = word;
    }
    out
}
