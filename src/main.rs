use anyhow::Result;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use std::env;

use assetools::console::{clear_terminal, log_error, pause};
use assetools::logging::init_logger;
use assetools::options::print_option_help;
use assetools::{run_tool, Tool, ToolOptions};

fn main() -> Result<()> {
    // ANSI colours on Windows consoles
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    let cli_args: Vec<String> = env::args().skip(1).collect();
    if !cli_args.is_empty() {
        if let Err(error) = run_cli_command(&cli_args) {
            eprintln!("ERROR: {:#}", error);
            std::process::exit(1);
        }
        return Ok(());
    }

    init_logger(false);
    clear_terminal();
    print_banner();

    // Keep the window open on failure when launched by double-click.
    match run_menu() {
        Ok(_) => Ok(()),
        Err(e) => {
            log_error(&format!("{:#}", e));
            pause();
            std::process::exit(1);
        }
    }
}

fn run_cli_command(args: &[String]) -> Result<()> {
    match args {
        [flag] if flag == "--help" || flag == "-h" => {
            print_cli_help();
            Ok(())
        }
        [command, rest @ ..] => {
            let Some(tool) = Tool::from_name(command) else {
                print_cli_help();
                return Err(anyhow::anyhow!("Unsupported command: {}", args.join(" ")));
            };

            if rest.iter().any(|arg| arg == "--help" || arg == "-h") {
                print_tool_help(tool);
                return Ok(());
            }

            let opts = ToolOptions::from_args(rest)?;
            init_logger(opts.verbose);
            run_tool(tool, &opts)
        }
        [] => {
            print_cli_help();
            Ok(())
        }
    }
}

fn print_cli_help() {
    println!("assetools");
    println!();
    println!("Usage:");
    println!("  assetools <tool> [options]");
    println!("  assetools            (interactive menu)");
    println!();
    println!("Tools:");
    for tool in Tool::ALL {
        println!("  {:<10} {}", tool.name(), tool.description());
    }
    println!();
    println!("Run `assetools <tool> --help` for detailed options.");
}

fn print_tool_help(tool: Tool) {
    println!("assetools {}", tool.name());
    println!();
    println!("{}", tool.description());
    println!();
    println!("Usage:");
    println!("  assetools {} [options]", tool.name());
    println!();
    print_option_help();
}

fn print_banner() {
    println!();
    println!(
        "{}",
        "        >>> assetools (Spine Asset Toolbox) <<<        "
            .truecolor(80, 255, 255)
            .bold()
    );
    println!(
        "{}",
        "   -----------------------------------------------------   ".dimmed()
    );
    println!();
}

fn run_menu() -> Result<()> {
    loop {
        let mut selections: Vec<String> = Tool::ALL
            .iter()
            .map(|tool| format!("{} ({})", tool.title(), tool.name()))
            .collect();
        selections.push("🔙 退出 (Exit)".to_string());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("assetools")
            .default(0)
            .items(&selections[..])
            .interact()?;

        let Some(tool) = Tool::ALL.get(selection).copied() else {
            return Ok(());
        };

        let opts = ToolOptions::from_args(&[])?;
        if let Err(error) = run_tool(tool, &opts) {
            log_error(&format!("{:#}", error));
        }
        pause();
    }
}
