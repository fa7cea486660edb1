//! Line prompts used when `analyze` is run without `--tickers`.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{CliError, CliResult};

/// Answers collected from the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketAnswers {
    pub tickers: String,
    /// Blank means equal weights.
    pub weights: String,
    /// Blank means the configured default.
    pub period: String,
}

/// Prompts on stdin, provided stdin is attached to a terminal.
pub fn ask_basket() -> CliResult<BasketAnswers> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::MissingArgument("--tickers".into()));
    }
    let mut input = stdin.lock();
    let mut output = io::stderr();
    ask_basket_from(&mut input, &mut output)
}

/// Reads the three answers from any line source.
pub fn ask_basket_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> CliResult<BasketAnswers> {
    let tickers = ask(input, output, "Tickers (comma separated, e.g. AAPL,MSFT): ")?;
    if tickers.is_empty() {
        return Err(CliError::MissingArgument("tickers".into()));
    }
    let weights = ask(input, output, "Weights (comma separated, blank for equal): ")?;
    let period = ask(input, output, "Period (e.g. 1y, 3y, 5y, max; blank for default): ")?;
    Ok(BasketAnswers {
        tickers,
        weights,
        period,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> CliResult<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_three_answers() {
        let mut input = Cursor::new("aapl, msft\n60,40\n3y\n");
        let mut output = Vec::new();
        let answers = ask_basket_from(&mut input, &mut output).unwrap();
        assert_eq!(answers.tickers, "aapl, msft");
        assert_eq!(answers.weights, "60,40");
        assert_eq!(answers.period, "3y");
        assert!(String::from_utf8(output).unwrap().contains("Tickers"));
    }

    #[test]
    fn test_blank_answers_are_kept_blank() {
        let mut input = Cursor::new("SPY\n\n\n");
        let answers = ask_basket_from(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(answers.weights, "");
        assert_eq!(answers.period, "");
    }

    #[test]
    fn test_empty_tickers_rejected() {
        let mut input = Cursor::new("\n");
        let err = ask_basket_from(&mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument(_)));
    }
}
