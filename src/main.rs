use anyhow::Context;
use clap::Parser;
use nuclide_explorer::utils::error::ErrorSeverity;
use nuclide_explorer::utils::{logger, validation::Validate};
use nuclide_explorer::{
    CliConfig, DataSource, Explorer, ExplorerConfig, ExplorerError, Exporter, LocalStorage,
    Neighborhood, Result, TomlConfig,
};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting nuclide-explorer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let exporter = config
        .output_path
        .clone()
        .map(|path| Exporter::new(LocalStorage::new(path)));

    let mut session = Session {
        explorer: Explorer::new(config),
        exporter,
        json: cli.json,
    };

    if !cli.symbols.is_empty() {
        return session.run_batch(&cli.symbols);
    }

    if cli.reads_stdin() {
        fail(&ExplorerError::ConfigError {
            message: "reading the table from stdin requires at least one --symbol".to_string(),
        });
    }

    session.run_interactive()
}

fn build_config(cli: &CliConfig) -> Result<ExplorerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            ExplorerConfig::from_toml(&toml)?
        }
        None => ExplorerConfig::default(),
    };

    // 應用命令列覆蓋設定
    cli.apply_to(&mut config)?;
    config.validate()?;

    tracing::debug!(
        "Radius {}, color scheme {:?}, output {:?}",
        config.radius,
        config.color_scheme,
        config.output_path
    );
    Ok(config)
}

struct Session {
    explorer: Explorer<ExplorerConfig>,
    exporter: Option<Exporter<LocalStorage>>,
    json: bool,
}

impl Session {
    fn run_batch(&mut self, symbols: &[String]) -> anyhow::Result<()> {
        if let Err(e) = self.explorer.load() {
            fail(&e);
        }

        for symbol in symbols {
            match self.explorer.query(symbol) {
                Ok(result) => self.present(&result)?,
                Err(ExplorerError::NotFound(e)) => {
                    tracing::warn!("{}", e);
                    println!("⚠️ Element not found: {}", e.symbol);
                }
                Err(e) => fail(&e),
            }
        }

        Ok(())
    }

    fn run_interactive(&mut self) -> anyhow::Result<()> {
        println!("🌟 Interactive nuclide table explorer");
        println!("Type an element symbol, :help for commands, :quit to leave.");

        if let Err(e) = self.explorer.load() {
            report(&e);
            println!("Use :load <file.csv> to open a nuclide table.");
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("Element symbol (e.g. Fe): ");
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line.context("failed to read from stdin")?,
                None => break,
            };

            match parse_command(&line) {
                Command::Empty => println!("ℹ️ Enter a symbol to begin."),
                Command::Quit => break,
                Command::Help => print_help(),
                Command::Load(path) => self.reload(path),
                Command::Radius(value) => self.change_radius(value),
                Command::Unknown(name) => {
                    println!("❓ Unknown command: {}", name);
                    print_help();
                }
                Command::Lookup(symbol) => self.lookup(symbol)?,
            }
        }

        tracing::info!("Session finished");
        Ok(())
    }

    fn lookup(&mut self, symbol: &str) -> anyhow::Result<()> {
        match self.explorer.query(symbol) {
            Ok(result) => self.present(&result)?,
            Err(ExplorerError::NotFound(_)) => println!("⚠️ Element not found."),
            Err(e) => report(&e),
        }
        Ok(())
    }

    fn reload(&mut self, path: &str) {
        if path.is_empty() {
            println!("Usage: :load <file.csv>");
            return;
        }
        match self.explorer.reload(DataSource::Path(path.into())) {
            Ok(dataset) => println!("📥 Loaded {} nuclides from {}", dataset.len(), path),
            Err(e) => report(&e),
        }
    }

    fn change_radius(&mut self, value: &str) {
        let parsed = value.parse::<u32>().map_err(|_| ExplorerError::InvalidConfigValueError {
            field: "radius".to_string(),
            value: value.to_string(),
            reason: "Value must be a whole number".to_string(),
        });

        match parsed.and_then(|radius| self.explorer.set_radius(radius)) {
            Ok(()) => println!("Radius set to {}", self.explorer.radius()),
            Err(e) => report(&e),
        }
    }

    fn present(&self, result: &Neighborhood) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print_table(result);
        }

        if let (Some(exporter), Some(dataset)) = (&self.exporter, self.explorer.dataset()) {
            match exporter.export(dataset, result, &self.explorer.config().export) {
                Ok(files) => {
                    for file in files {
                        println!(
                            "📁 Output saved to: {}",
                            exporter.storage().resolve(&file).display()
                        );
                    }
                }
                Err(e) => report(&e),
            }
        }

        Ok(())
    }
}

/// 互動模式的一行輸入
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Quit,
    Help,
    Load(&'a str),
    Radius(&'a str),
    Unknown(&'a str),
    Lookup(&'a str),
}

/// 以第一個以空白分隔的字詞判斷指令，`:loader` 不會被當成 `:load`
fn parse_command(input: &str) -> Command<'_> {
    let input = input.trim();
    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    };

    match head {
        "" => Command::Empty,
        ":quit" | ":q" => Command::Quit,
        ":help" => Command::Help,
        ":load" => Command::Load(rest),
        ":radius" => Command::Radius(rest),
        other if other.starts_with(':') => Command::Unknown(other),
        _ => Command::Lookup(input),
    }
}

fn print_table(result: &Neighborhood) {
    println!();
    println!(
        "Nuclides around {} (Z = {} ± {}, colored by {})",
        result.symbol, result.central_z, result.radius, result.scheme
    );

    let name_width = result
        .records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:>4} {:>4}  {:<6} {:<name_width$}  {:<12} {:<12} {}",
        "Z", "A", "Symbol", "Name", "Stability", "Decay", "Half-life"
    );

    for (record, marker) in result.records.iter().zip(&result.display) {
        println!(
            "{:>4} {:>4}  {:<6} {:<name_width$}  {:<12} {:<12} {:<12} [{}]",
            record.atomic_number,
            record.mass_number,
            record.symbol,
            record.name,
            record.stability.as_deref().unwrap_or("-"),
            record.decay_mode.as_deref().unwrap_or("-"),
            record.half_life.as_deref().unwrap_or("-"),
            marker.color
        );
    }

    if result.records.is_empty() {
        println!("(no nuclides in this window)");
    }
    println!();
}

fn print_help() {
    println!("  <symbol>        show the nuclides around an element, e.g. Fe");
    println!("  :load <file>    load another nuclide table");
    println!("  :radius <n>     change the Z window radius");
    println!("  :quit           leave");
}

fn report(e: &ExplorerError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn fail(e: &ExplorerError) -> ! {
    report(e);

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
