/// Parser for lines typed at the interactive prompt
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{alpha1, char, multispace0, multispace1},
    combinator::{all_consuming, opt, value},
    number::complete::float,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use rigid3d_core::Order;
use thiserror::Error;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Convert three angles in degrees; `order` falls back to the app default.
    Rotate {
        degrees: [f32; 3],
        order: Option<Order>,
    },
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Could not read '{0}'. Expected three angles in degrees and an optional order, e.g. '30 45 60 xyz'")]
    Syntax(String),

    #[error("Angles must be finite numbers")]
    NonFinite,

    #[error(transparent)]
    Order(#[from] rigid3d_core::Error),
}

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    if line.trim().is_empty() {
        return Ok(Command::Empty);
    }
    if let Ok((_, command)) = all_consuming(keyword)(line) {
        return Ok(command);
    }

    let (_, (degrees, order)) =
        all_consuming(rotation)(line).map_err(|_| ParseError::Syntax(line.trim().to_string()))?;

    if degrees.iter().any(|d| !d.is_finite()) {
        return Err(ParseError::NonFinite);
    }
    let order = order.map(str::parse::<Order>).transpose()?;

    Ok(Command::Rotate { degrees, order })
}

fn keyword(input: &str) -> IResult<&str, Command> {
    delimited(
        multispace0,
        alt((
            value(
                Command::Quit,
                alt((tag_no_case("quit"), tag_no_case("exit"), tag_no_case("q"))),
            ),
            value(Command::Help, alt((tag_no_case("help"), tag("?"), tag_no_case("h")))),
        )),
        multispace0,
    )(input)
}

/// Whitespace or a comma between fields.
fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((multispace0, char(','), multispace0))),
        value((), multispace1),
    ))(input)
}

fn angles(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, alpha) = preceded(multispace0, float)(input)?;
    let (input, beta) = preceded(separator, float)(input)?;
    let (input, gamma) = preceded(separator, float)(input)?;
    Ok((input, [alpha, beta, gamma]))
}

fn rotation(input: &str) -> IResult<&str, ([f32; 3], Option<&str>)> {
    let (input, degrees) = angles(input)?;
    let (input, order) = opt(preceded(separator, alpha1))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (degrees, order)))
}
