//! Interactive line-oriented shell
//!
//! Parses textual commands into `ResourceManager` calls and prints tabular
//! results. All input parsing lives here: ids are normalized to uppercase and
//! malformed numbers are reported as shell errors, so the core only ever sees
//! already-parsed integers.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use gridlock::{detect_deadlock, ResourceManager, Scenario};

use crate::ui;

pub fn cmd_shell() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = ShellSession::new();

    {
        let mut out = stdout.lock();
        writeln!(out, "Gridlock shell")?;
        writeln!(out, "Type 'help' for a list of commands")?;
        write!(out, "\n> ")?;
        out.flush()?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let mut out = stdout.lock();
        if !session.handle_line(&line, &mut out)? {
            break;
        }
        write!(out, "\n> ")?;
        out.flush()?;
    }
    Ok(())
}

/// One interactive session holding the single manager instance every
/// command operates on
pub struct ShellSession {
    manager: ResourceManager,
}

impl ShellSession {
    pub fn new() -> Self {
        Self {
            manager: ResourceManager::new(),
        }
    }

    /// Execute one input line. Returns `false` when the session should end.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(true);
        };

        match command.to_lowercase().as_str() {
            "help" => self.show_help(out)?,
            "add-process" => self.add_process(args, out)?,
            "add-resource" => self.add_resource(args, out)?,
            "update-allocation" => self.update_allocation(args, out)?,
            "update-request" => self.update_request(args, out)?,
            "remove-process" => self.remove_process(args, out)?,
            "remove-resource" => self.remove_resource(args, out)?,
            "show-matrix" => self.show_matrix(out)?,
            "detect" | "detect-deadlock" => self.detect(out)?,
            "load-example" => self.load_example(out)?,
            "clear" => self.clear_all(out)?,
            "save" => self.save(args, out)?,
            "load" => self.load(args, out)?,
            "exit" | "quit" => {
                writeln!(out, "Exiting...")?;
                return Ok(false);
            }
            unknown => {
                writeln!(
                    out,
                    "Unknown command: {}. Type 'help' for a list of commands.",
                    unknown
                )?;
            }
        }
        Ok(true)
    }

    fn show_help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Available commands:")?;
        writeln!(out, "  help                                            - Show this help message")?;
        writeln!(out, "  add-process <process_id>                        - Add a new process")?;
        writeln!(out, "  add-resource <resource_id> [instances]          - Add a new resource (default: 1 instance)")?;
        writeln!(out, "  update-allocation <process> <resource> <value>  - Set allocation value")?;
        writeln!(out, "  update-request <process> <resource> <value>     - Set request value")?;
        writeln!(out, "  remove-process <process_id>                     - Remove a process")?;
        writeln!(out, "  remove-resource <resource_id>                   - Remove a resource")?;
        writeln!(out, "  show-matrix                                     - Show allocation and request matrices")?;
        writeln!(out, "  detect                                          - Run deadlock detection")?;
        writeln!(out, "  load-example                                    - Load a sample example")?;
        writeln!(out, "  save <file> / load <file>                       - Save or load a scenario (JSON)")?;
        writeln!(out, "  clear                                           - Clear all processes and resources")?;
        writeln!(out, "  exit                                            - Exit the shell")?;
        Ok(())
    }

    fn add_process(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(id) = args.first() else {
            return writeln!(out, "Error: Process ID is required");
        };
        let id = id.to_uppercase();
        match self.manager.add_process(&id) {
            Ok(()) => writeln!(out, "Process {} added", id),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }

    fn add_resource(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(id) = args.first() else {
            return writeln!(out, "Error: Resource ID is required");
        };
        let id = id.to_uppercase();

        let instances = match args.get(1) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) => n,
                Err(_) => return writeln!(out, "Error: Instances must be an integer"),
            },
            None => 1,
        };

        match self.manager.add_resource(&id, instances, instances > 1) {
            Ok(()) => writeln!(out, "Resource {} added with {} instance(s)", id, instances.max(1)),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }

    fn update_allocation(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some((process_id, resource_id, value)) = parse_cell_args(args) else {
            return writeln!(out, "Error: Process ID, Resource ID, and integer value are required");
        };
        match self.manager.update_allocation(&process_id, &resource_id, value) {
            Ok(stored) => writeln!(
                out,
                "Updated allocation: {} allocated {} of {}",
                process_id, stored, resource_id
            ),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }

    fn update_request(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some((process_id, resource_id, value)) = parse_cell_args(args) else {
            return writeln!(out, "Error: Process ID, Resource ID, and integer value are required");
        };
        match self.manager.update_request(&process_id, &resource_id, value) {
            Ok(()) => writeln!(
                out,
                "Updated request: {} requesting {} of {}",
                process_id,
                value.max(0),
                resource_id
            ),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }

    fn remove_process(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(id) = args.first() else {
            return writeln!(out, "Error: Process ID is required");
        };
        let id = id.to_uppercase();
        self.manager.remove_process(&id);
        writeln!(out, "Process {} removed", id)
    }

    fn remove_resource(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(id) = args.first() else {
            return writeln!(out, "Error: Resource ID is required");
        };
        let id = id.to_uppercase();
        self.manager.remove_resource(&id);
        writeln!(out, "Resource {} removed", id)
    }

    fn show_matrix(&self, out: &mut impl Write) -> io::Result<()> {
        if self.manager.matrix().is_empty() {
            return writeln!(out, "No processes or resources defined yet");
        }
        write!(out, "{}", super::show::render_matrices(self.manager.matrix()))?;
        writeln!(out, "\nAvailable Resources:")?;
        write!(
            out,
            "{}",
            ui::table::render_available(&self.manager.get_available_resources())
        )
    }

    fn detect(&self, out: &mut impl Write) -> io::Result<()> {
        let matrix = self.manager.matrix();
        if matrix.processes.is_empty() || matrix.resources.is_empty() {
            return writeln!(out, "No processes or resources defined yet");
        }
        let result = detect_deadlock(&self.manager.snapshot());
        write!(out, "{}", ui::report::render_detection(&result))
    }

    fn load_example(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.manager.load_example();
        writeln!(out, "Loaded sample example")?;
        self.show_matrix(out)
    }

    fn clear_all(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.manager.clear_all();
        writeln!(out, "Cleared all processes and resources")
    }

    fn save(&self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(path) = args.first() else {
            return writeln!(out, "Error: File path is required");
        };
        match Scenario::from_manager(&self.manager).save(Path::new(path)) {
            Ok(()) => writeln!(out, "Saved scenario to {}", path),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }

    fn load(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        let Some(path) = args.first() else {
            return writeln!(out, "Error: File path is required");
        };
        let loaded = Scenario::load(Path::new(path)).and_then(|s| s.apply(&mut self.manager));
        match loaded {
            Ok(()) => writeln!(out, "Loaded scenario from {}", path),
            Err(err) => writeln!(out, "Error: {}", err),
        }
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `<process> <resource> <value>`, uppercasing the ids
fn parse_cell_args(args: &[&str]) -> Option<(String, String, i64)> {
    let [process_id, resource_id, value] = args.first_chunk::<3>()?;
    let value = value.parse::<i64>().ok()?;
    Some((process_id.to_uppercase(), resource_id.to_uppercase(), value))
}
