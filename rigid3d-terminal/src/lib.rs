/// Line-oriented terminal front end for rotation conversions
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rigid3d_core::{format::DEFAULT_PRECISION, Euler, Order, GIMBAL_EPSILON};
use std::io::{self, stdin, stdout, BufRead, Write};

pub mod parser;
pub mod report;

pub use parser::{parse_line, Command, ParseError};
pub use report::Report;

const HELP: &str = "\
Enter three angles in degrees and an optional order, e.g. '30 45 60 zyx'.
Orders: XYZ XZY YXZ YZX ZXY ZYX (upper or lower case).
Commands: help, quit\n";

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    /// Digits after the decimal point in every printed number.
    pub precision: usize,
    /// Order used when a line does not name one.
    pub default_order: Order,
    /// Gimbal-lock threshold for angle extraction.
    pub epsilon: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            default_order: Order::default(),
            epsilon: GIMBAL_EPSILON,
        }
    }
}

/// Main application struct for the interactive converter
pub struct TerminalApp {
    config: AppConfig,
    running: bool,
}

impl TerminalApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            running: true,
        }
    }

    /// Prompt on stdout and read stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = stdin();
        let mut stdout = stdout();
        self.main_loop(&mut stdin.lock(), &mut stdout)
    }

    pub fn main_loop<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        queue!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Rigid3D | default order {} | type 'help' for usage\n",
                self.config.default_order
            )),
            ResetColor
        )?;

        let mut line = String::new();
        while self.running {
            queue!(out, Print("> "))?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            self.handle_input(&line, out)?;
        }

        tracing::debug!("leaving main loop");
        out.flush()
    }

    /// Evaluate a single line and report whether it was understood.
    pub fn evaluate<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let understood = match parse_line(line) {
            Ok(command) => {
                self.execute(command, out)?;
                true
            }
            Err(err) => {
                self.render_error(&err, out)?;
                false
            }
        };
        out.flush()?;
        Ok(understood)
    }

    fn handle_input<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        self.evaluate(line, out).map(|_| ())
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        match command {
            Command::Quit => {
                self.running = false;
            }
            Command::Help => {
                queue!(out, Print(HELP))?;
            }
            Command::Empty => {}
            Command::Rotate { degrees, order } => {
                let order = order.unwrap_or(self.config.default_order);
                let [alpha, beta, gamma] = degrees;
                tracing::info!(alpha, beta, gamma, %order, "converting rotation");
                self.render(Euler::from_degrees(alpha, beta, gamma, order), out)?;
            }
        }
        Ok(())
    }

    fn render<W: Write>(&self, euler: Euler, out: &mut W) -> io::Result<()> {
        let report = Report::new(euler, self.config.epsilon);
        if report.gimbal_lock {
            tracing::warn!(order = %euler.order, "rotation is in gimbal lock");
        }
        report.draw(out, self.config.precision)
    }

    fn render_error<W: Write>(&self, err: &ParseError, out: &mut W) -> io::Result<()> {
        tracing::debug!(%err, "rejected input");
        queue!(
            out,
            SetForegroundColor(Color::Red),
            Print(format!("{err}\n")),
            ResetColor
        )
    }
}
