//! Interactive form: one line per calculation, with a sticky quantization selection.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use super::about::{about_text, TITLE};
use super::{calculate_with, EstimateReport};
use crate::estimator::{parse_parameters, parse_quant_bits, QuantizationBits, Result, INVALID_INPUT};

const HELP: &str = "Commands:
  <params> [bits]   estimate memory for <params> billion parameters
  bits [32|16|8|4]  show or change the quantization selection
  about             show the formula
  help              show this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Nothing,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    quant: QuantizationBits,
}

impl Session {
    pub fn new(quant: QuantizationBits) -> Self {
        Self { quant }
    }

    pub fn quant(&self) -> QuantizationBits {
        self.quant
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else { return Reply::Nothing };
        let rest: Vec<&str> = words.collect();

        match (first.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("quit" | "exit", []) => Reply::Quit,
            ("help", []) => Reply::Output(HELP.to_string()),
            ("about", []) => Reply::Output(about_text()),
            ("bits", []) => Reply::Output(format!("Quantization: {} bits", self.quant)),
            ("bits", [raw]) => match parse_quant_bits(raw) {
                Ok(q) => {
                    self.quant = q;
                    debug!(bits = %q, "Quantization selection changed");
                    Reply::Output(format!("Quantization: {q} bits"))
                }
                Err(_) => Reply::Output(INVALID_INPUT.to_string()),
            },
            (_, []) => Reply::Output(self.render(first, None)),
            (_, [bits]) => Reply::Output(self.render(first, Some(*bits))),
            _ => Reply::Output(INVALID_INPUT.to_string()),
        }
    }

    fn calculate(&self, raw_parameters: &str, raw_bits: Option<&str>) -> Result<EstimateReport> {
        let parameters = parse_parameters(raw_parameters)?;
        let quant = match raw_bits {
            Some(raw) => parse_quant_bits(raw)?,
            None => self.quant,
        };
        Ok(calculate_with(parameters, quant))
    }

    fn render(&self, raw_parameters: &str, raw_bits: Option<&str>) -> String {
        match self.calculate(raw_parameters, raw_bits) {
            Ok(report) => report.memory_gb.to_string(),
            Err(_) => INVALID_INPUT.to_string(),
        }
    }

    /// Runs until `quit` or end of input. The prompt is written before each read.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "{TITLE} (quantization: {} bits, type 'help' for commands)", self.quant)?;
        info!(bits = %self.quant, "Interactive session started");
        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else { break };
            match self.handle(&line?) {
                Reply::Output(text) => writeln!(out, "{text}")?,
                Reply::Nothing => {}
                Reply::Quit => break,
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(QuantizationBits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(session: &mut Session, line: &str) -> String {
        match session.handle(line) {
            Reply::Output(s) => s,
            other => panic!("expected output for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn uses_current_selection_when_bits_omitted() {
        let mut s = Session::default();
        assert_eq!(reply(&mut s, "7"), "8.40 GB");
        assert_eq!(reply(&mut s, "bits 4"), "Quantization: 4 bits");
        assert_eq!(reply(&mut s, "7"), "4.20 GB");
        assert_eq!(s.quant(), QuantizationBits::Four);
    }

    #[test]
    fn explicit_bits_do_not_change_selection() {
        let mut s = Session::default();
        assert_eq!(reply(&mut s, "13 32"), "62.40 GB");
        assert_eq!(s.quant(), QuantizationBits::Eight);
    }

    #[test]
    fn bad_lines_render_invalid_input() {
        let mut s = Session::default();
        for line in ["abc", "7 5", "7 8 9", "-7", "bits 12", "bits x"] {
            assert_eq!(reply(&mut s, line), "Invalid input", "line {line:?}");
        }
        assert_eq!(s.quant(), QuantizationBits::Eight);
    }

    #[test]
    fn control_commands() {
        let mut s = Session::default();
        assert_eq!(s.handle("   "), Reply::Nothing);
        assert_eq!(s.handle("QUIT"), Reply::Quit);
        assert_eq!(s.handle("exit"), Reply::Quit);
        assert!(reply(&mut s, "help").contains("bits [32|16|8|4]"));
        assert!(reply(&mut s, "about").contains("Formula"));
        assert_eq!(reply(&mut s, "bits"), "Quantization: 8 bits");
    }

    #[test]
    fn run_reads_until_quit() {
        let input = "7\n\n70 16\nabc\nquit\n7\n";
        let mut out = Vec::new();
        Session::default().run(input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let results: Vec<&str> =
            text.lines().map(|l| l.trim_start_matches("> ")).filter(|l| l.ends_with("GB") || *l == "Invalid input").collect();
        assert_eq!(results, ["8.40 GB", "168.00 GB", "Invalid input"]);
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let mut out = Vec::new();
        Session::new(QuantizationBits::ThirtyTwo).run("13".as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("62.40 GB"));
        assert!(text.starts_with(TITLE));
    }
}
