use crate::cli::validate_imsi;
use crate::error::{Result, SubListError};
use console::style;
use std::io::{BufRead, Write};

/// Asks for one IMSI on `output` and reads the answer from `input`.
///
/// End of input yields [`SubListError::MissingInput`]; anything else is run
/// through the same validation as IMSIs given on the command line.
pub fn prompt_imsi<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{} ", style(label).bold())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SubListError::MissingInput {
            what: label.trim_end_matches(':').to_lowercase(),
        });
    }

    validate_imsi(&line).map_err(|reason| SubListError::InvalidImsi {
        imsi: line.trim().to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_and_trims() {
        let mut input = Cursor::new("  001010000000001 \n");
        let mut output = Vec::new();

        let imsi = prompt_imsi(&mut input, &mut output, "Enter first IMSI to compare:").unwrap();
        assert_eq!(imsi, "001010000000001");
        assert!(String::from_utf8(output).unwrap().contains("Enter first IMSI"));
    }

    #[test]
    fn test_prompt_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let result = prompt_imsi(&mut input, &mut output, "Enter second IMSI to compare:");
        assert!(matches!(result, Err(SubListError::MissingInput { .. })));
    }

    #[test]
    fn test_prompt_rejects_blank_answer() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let result = prompt_imsi(&mut input, &mut output, "Enter first IMSI to compare:");
        assert!(matches!(result, Err(SubListError::InvalidImsi { .. })));
    }
}
