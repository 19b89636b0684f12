// Interactive collection of the search scope.

use crate::{
    error::{ScraperError, ScraperResult},
    models::QueryParameters,
};
use std::io::{BufRead, Write};
use std::num::NonZeroU32;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageCountError {
    #[error("Por favor, digite um número válido.")]
    NotANumber,
    #[error("Por favor, digite um número maior que 0.")]
    NotPositive,
    #[error("Por favor, digite um número até 4294967295.")]
    TooLarge,
}

/// Validates the page-count answer.
pub fn parse_max_pages(input: &str) -> Result<NonZeroU32, PageCountError> {
    let text = input.trim();
    let value: i128 = match text.parse() {
        Ok(value) => value,
        // Digits only but beyond i128
        Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(PageCountError::TooLarge);
        }
        Err(_) => return Err(PageCountError::NotANumber),
    };
    if value <= 0 {
        return Err(PageCountError::NotPositive);
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(PageCountError::TooLarge)
}

/// Trims and lower-cases a slug answer; empty means "not given".
pub fn normalize_slug(input: &str) -> Option<String> {
    let slug = input.trim().to_lowercase();
    (!slug.is_empty()).then_some(slug)
}

/// `campo-grande` -> `Campo Grande`
pub fn display_name(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> ScraperResult<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ScraperError::Input(format!("input closed while waiting for: {}", question.trim())));
    }
    Ok(line)
}

/// Asks for region, city, optional neighborhood and page count.
/// The page count is asked again until it is a positive integer.
pub fn read_query<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> ScraperResult<QueryParameters> {
    let region = normalize_slug(&ask(input, output, "Digite o estado (ex: ms, sp, rj): ")?).unwrap_or_default();
    let city = normalize_slug(&ask(input, output, "Digite a cidade (ex: campo-grande, sao-paulo): ")?).unwrap_or_default();
    let neighborhood = normalize_slug(&ask(
        input,
        output,
        "Digite o bairro (deixe vazio para buscar toda a cidade): ",
    )?);

    let max_pages = loop {
        let answer = ask(input, output, "Digite o número máximo de páginas (ex: 5): ")?;
        match parse_max_pages(&answer) {
            Ok(pages) => break pages,
            Err(e) => writeln!(output, "{e}")?,
        }
    };

    Ok(QueryParameters::new(region, city, neighborhood, max_pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_max_pages_accepts_positive_integers() {
        assert_eq!(parse_max_pages("5").unwrap().get(), 5);
        assert_eq!(parse_max_pages("  12\n").unwrap().get(), 12);
    }

    #[test]
    fn parse_max_pages_rejects_invalid_input() {
        assert_eq!(parse_max_pages("0"), Err(PageCountError::NotPositive));
        assert_eq!(parse_max_pages("-3"), Err(PageCountError::NotPositive));
        assert_eq!(parse_max_pages("abc"), Err(PageCountError::NotANumber));
        assert_eq!(parse_max_pages(""), Err(PageCountError::NotANumber));
        assert_eq!(parse_max_pages("2.5"), Err(PageCountError::NotANumber));
    }

    #[test]
    fn parse_max_pages_reports_out_of_range_counts() {
        assert_eq!(parse_max_pages("4294967295").unwrap().get(), u32::MAX);
        assert_eq!(parse_max_pages("4294967296"), Err(PageCountError::TooLarge));
        assert_eq!(
            parse_max_pages("999999999999999999999999999999999999999999"),
            Err(PageCountError::TooLarge)
        );
        assert_eq!(
            PageCountError::TooLarge.to_string(),
            format!("Por favor, digite um número até {}.", u32::MAX)
        );
    }

    #[test]
    fn slugs_are_normalized() {
        assert_eq!(normalize_slug("  Campo-Grande \n"), Some("campo-grande".to_string()));
        assert_eq!(normalize_slug("   \n"), None);
    }

    #[test]
    fn display_name_title_cases_slugs() {
        assert_eq!(display_name("campo-grande"), "Campo Grande");
        assert_eq!(display_name("sao-francisco"), "Sao Francisco");
        assert_eq!(display_name("ms"), "Ms");
    }

    #[test]
    fn read_query_reprompts_until_page_count_is_valid() {
        let mut input = Cursor::new("MS\nCampo-Grande\n\nabc\n0\n3\n");
        let mut output = Vec::new();

        let query = read_query(&mut input, &mut output).unwrap();

        assert_eq!(query.region_code, "ms");
        assert_eq!(query.city_slug, "campo-grande");
        assert_eq!(query.neighborhood_slug, None);
        assert_eq!(query.max_pages.get(), 3);

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("número máximo de páginas").count(), 3);
        assert!(transcript.contains("Por favor, digite um número válido."));
        assert!(transcript.contains("Por favor, digite um número maior que 0."));
    }

    #[test]
    fn read_query_keeps_neighborhood() {
        let mut input = Cursor::new("ms\ncampo-grande\nSao-Francisco\n1\n");
        let query = read_query(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(query.neighborhood_slug.as_deref(), Some("sao-francisco"));
    }

    #[test]
    fn read_query_fails_when_input_ends() {
        let mut input = Cursor::new("ms\ncampo-grande\n\nabc\n");
        let err = read_query(&mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ScraperError::Input(_)));
    }
}
