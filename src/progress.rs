// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of ProgressPrinter structure for printing the progress of trajectory conversion.

use colored::{ColoredString, Colorize};
use std::io::Write;

/// Progress of trajectory conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressStatus {
    /// Frames are being converted.
    Running,
    /// All frames have been converted.
    Completed,
    /// Conversion failed.
    Failed,
}

/// String that can be used inside `ProgressPrinter`.
#[derive(Debug, Clone, PartialEq)]
struct ProgressMessage {
    msg: ColoredString,
}

impl ProgressMessage {
    /// Create new `ProgressMessage`.
    ///
    /// ## Panics
    /// Panics if the string is longer than 9 characters.
    fn new(string: ColoredString) -> Self {
        if string.chars().count() > 9 {
            panic!("FATAL VENUS2GMX ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters.");
        }

        ProgressMessage { msg: string }
    }

    /// Print formatted `ProgressMessage`.
    fn print(&self, out: &mut dyn Write, colored: bool) {
        if colored {
            write!(out, "[{: ^9}]   ", self.msg)
                .expect("FATAL VENUS2GMX ERROR | ProgressMessage::print (1) | Could not write to `ProgressPrinter` stream.");
        } else {
            write!(out, "[{: ^9}]   ", self.msg.as_ref() as &str)
                .expect("FATAL VENUS2GMX ERROR | ProgressMessage::print (2) | Could not write to `ProgressPrinter` stream.");
        }
    }
}

/// Structure handling printing of progress of the conversion.
/// Constructed using `ProgressPrinter::new()` and associated with the conversion
/// using `Converter::print_progress()`.
pub struct ProgressPrinter {
    /// Stream to write the progress info to.
    output: Box<dyn Write>,
    /// Current status of the conversion. Default: ProgressStatus::Running.
    status: ProgressStatus,
    /// Frequency of printing. Print every `print_freq`th frame. Default: 100 frames.
    print_freq: usize,
    /// If true, the output will be colored. Default: true.
    colored: bool,
    /// String to be printed with the trajectory number. Default: "Traj".bright_blue().
    trajectory_msg: ColoredString,
    /// String to be printed with the integration cycle. Default: "Cycle".cyan().
    cycle_msg: ColoredString,
    /// String to be printed with the simulation time. Default: "Time".bright_purple().
    time_msg: ColoredString,
    /// Default: "RUNNING".yellow().
    running_msg: ProgressMessage,
    /// Default: "COMPLETED".green().
    completed_msg: ProgressMessage,
    /// Default: "FAILED!".red().
    failed_msg: ProgressMessage,
    /// String terminating the progress message. Default: `\r` (carriage return).
    terminating: String,
}

impl ProgressPrinter {
    /// Create an instance of `ProgressPrinter` with default parameters.
    ///
    /// The default values of the `ProgressPrinter` parameters.
    /// - `output`: `std::io::stderr()` (stream to write the progress info to)
    /// - `status`: `ProgressStatus::Running` (current status of the conversion)
    /// - `print_freq`: `100` (progress info will be printed out every 100 converted frames)
    /// - `colored`: `true` (should the output be colored?)
    /// - `trajectory_msg`: `"Traj".bright_blue()`
    /// - `cycle_msg`: `"Cycle".cyan()`
    /// - `time_msg`: `"Time".bright_purple()`
    /// - `running_msg`: `"RUNNING".yellow()` (string printed while the conversion is running)
    /// - `completed_msg`: `"COMPLETED".green()` (string printed when the conversion is completed)
    /// - `failed_msg`: `"FAILED!".red()` (string printed when the conversion failed)
    /// - `terminating`: `\r` (string terminating the progress message; useful to set to `\n` when printing to a file)
    ///
    /// You can set custom values for any of the parameters by using `with_%PARAMETER()` method
    /// when constructing the `ProgressPrinter`.
    ///
    /// ## Examples
    /// ```no_run
    /// use venus2gmx::prelude::*;
    /// use colored::Colorize;
    ///
    /// // print info about every 10th frame
    /// // blue string "DONE" will be printed once the conversion is completed
    /// let printer = ProgressPrinter::new()
    ///     .with_print_freq(10)
    ///     .with_completed_msg("DONE".blue());
    ///
    /// let config = ConvertConfig::new("venus.out").with_output("traj.gro");
    /// Converter::new(config).print_progress(printer).run().unwrap();
    /// ```
    ///
    /// By default, `ProgressPrinter` prints to standard error output.
    /// However, you can also let it print into a file.
    /// ```no_run
    /// use venus2gmx::prelude::*;
    ///
    /// let file = std::fs::File::create("progress.log").unwrap();
    /// let printer = ProgressPrinter::new()
    ///     .with_output(Box::from(file))
    ///     .with_colored(false)
    ///     .with_terminating("\n");
    /// ```
    pub fn new() -> Self {
        ProgressPrinter {
            output: Box::from(std::io::stderr()),
            status: ProgressStatus::Running,
            print_freq: 100,
            colored: true,
            trajectory_msg: "Traj".bright_blue(),
            cycle_msg: "Cycle".cyan(),
            time_msg: "Time".bright_purple(),
            running_msg: ProgressMessage::new("RUNNING".yellow()),
            completed_msg: ProgressMessage::new("COMPLETED".green()),
            failed_msg: ProgressMessage::new("FAILED!".red()),
            terminating: String::from("\r"),
        }
    }

    /// Create new `ProgressPrinter` with specific `output` stream.
    pub fn with_output(mut self, stream: Box<dyn Write>) -> Self {
        self.output = stream;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `status`.
    pub fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    /// Set new status to an already constructed `ProgressPrinter`.
    pub fn set_status(&mut self, status: ProgressStatus) {
        self.status = status;
    }

    /// Create new `ProgressPrinter` with specific value for `print_freq`.
    ///
    /// ## Panics
    /// Panics if `print_freq` is zero.
    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        if print_freq == 0 {
            panic!("FATAL VENUS2GMX ERROR | ProgressPrinter::with_print_freq | Print frequency must be positive.");
        }

        self.print_freq = print_freq;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `colored`.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `trajectory_msg`.
    pub fn with_trajectory_msg(mut self, trajectory_msg: ColoredString) -> Self {
        self.trajectory_msg = trajectory_msg;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `cycle_msg`.
    pub fn with_cycle_msg(mut self, cycle_msg: ColoredString) -> Self {
        self.cycle_msg = cycle_msg;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `time_msg`.
    pub fn with_time_msg(mut self, time_msg: ColoredString) -> Self {
        self.time_msg = time_msg;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `running_msg`.
    ///
    /// ## Panics
    /// Panics if the `running_msg` is longer than 9 characters.
    pub fn with_running_msg(mut self, running_msg: ColoredString) -> Self {
        self.running_msg = ProgressMessage::new(running_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `completed_msg`.
    ///
    /// ## Panics
    /// Panics if the `completed_msg` is longer than 9 characters.
    pub fn with_completed_msg(mut self, completed_msg: ColoredString) -> Self {
        self.completed_msg = ProgressMessage::new(completed_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `failed_msg`.
    ///
    /// ## Panics
    /// Panics if the `failed_msg` is longer than 9 characters.
    pub fn with_failed_msg(mut self, failed_msg: ColoredString) -> Self {
        self.failed_msg = ProgressMessage::new(failed_msg);
        self
    }

    /// Create new `ProgressPrinter` with specific value for `terminating`.
    pub fn with_terminating(mut self, string: &str) -> Self {
        self.terminating = string.to_string();
        self
    }

    /// Print progress info about the conversion.
    ///
    /// While running, only every `print_freq`th frame is reported.
    /// Completion and failure are always reported.
    pub fn print(&mut self, frame_number: usize, trajectory: usize, cycle: u64, time: f64) {
        if self.status == ProgressStatus::Running && frame_number % self.print_freq != 0 {
            return;
        }

        match self.status {
            ProgressStatus::Running => self.running_msg.print(&mut self.output, self.colored),
            ProgressStatus::Completed => self.completed_msg.print(&mut self.output, self.colored),
            ProgressStatus::Failed => self.failed_msg.print(&mut self.output, self.colored),
        }

        if self.colored {
            write!(
                self.output,
                "{} {:6} | {} {:12} | {} {:12.4} ps{}",
                self.trajectory_msg,
                trajectory,
                self.cycle_msg,
                cycle,
                self.time_msg,
                time,
                self.terminating
            )
            .expect("FATAL VENUS2GMX ERROR | ProgressPrinter::print (1) | Could not write to `ProgressPrinter` stream.");
        } else {
            write!(
                self.output,
                "{} {:6} | {} {:12} | {} {:12.4} ps{}",
                self.trajectory_msg.as_ref() as &str,
                trajectory,
                self.cycle_msg.as_ref() as &str,
                cycle,
                self.time_msg.as_ref() as &str,
                time,
                self.terminating
            )
            .expect("FATAL VENUS2GMX ERROR | ProgressPrinter::print (2) | Could not write to `ProgressPrinter` stream.");
        }

        // final messages stay on their own line
        match self.status {
            ProgressStatus::Running => (),
            ProgressStatus::Completed | ProgressStatus::Failed => {
                if !self.terminating.ends_with('\n') {
                    writeln!(self.output).expect(
                        "FATAL VENUS2GMX ERROR | ProgressPrinter::print (3) | Could not write to `ProgressPrinter` stream.",
                    );
                }
            }
        }

        self.output
            .flush()
            .expect("FATAL VENUS2GMX ERROR | ProgressPrinter::print (4) | Could not flush `ProgressPrinter` stream.");
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
