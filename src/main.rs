// quadc: parse, simplify and lower a small imperative language into quadruples

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use quadc::ir::generator::QuadrupleGenerator;
use quadc::ir::quadruple::render_listing;
use quadc::ir::verify::verify;
use quadc::parser::parse::Parser;
use quadc::parser::simplify::simplify;
use quadc::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <file> [--list]", program_name);
    eprintln!();
    eprintln!("  --list    print the quadruple listing instead of opening the viewer");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("quadc");

    let mut list_only = false;
    let mut input = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--list" => list_only = true,
            _ if input.is_none() => input = Some(arg.as_str()),
            _ => {
                eprintln!("Error: unexpected argument '{}'", arg);
                print_usage(program_name);
                std::process::exit(1);
            }
        }
    }

    let Some(input) = input else {
        eprintln!("Error: No input file provided");
        eprintln!();
        print_usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(input).exists() {
        eprintln!("Error: File '{}' not found", input);
        print_usage(program_name);
        std::process::exit(1);
    }

    let source =
        fs::read_to_string(input).with_context(|| format!("failed to read '{}'", input))?;

    eprintln!("Parsing {}...", input);
    let raw = match Parser::from_source(&source).parse() {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let tree = simplify(&raw);
    eprintln!(
        "Parsed successfully. Simplified tree has {} nodes.",
        tree.size()
    );

    let mut generator = QuadrupleGenerator::new();
    if let Err(e) = generator.lower(&tree) {
        eprintln!("Lowering error: {}", e);
        std::process::exit(1);
    }
    eprintln!(
        "Generated {} quadruples ({} temporaries, {} labels).",
        generator.quadruples().len(),
        generator.temp_count(),
        generator.label_count()
    );

    if let Err(e) = verify(generator.quadruples()) {
        eprintln!("Listing check failed: {}", e);
        std::process::exit(1);
    }

    if list_only {
        println!("{}", render_listing(generator.quadruples()));
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let file_name = Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    let mut app = App::new(file_name, source, &tree, generator);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("viewer terminated with an I/O error")
}
