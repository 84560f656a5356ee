//
// main.rs
//

use std::fs;
use std::sync::Arc;

use tower_lsp::lsp_types::{DocumentSymbol, Position, Url};

use limelight::config::SpotlightConfig;
use limelight::controller::SpotlightController;
use limelight::document::Document;
use limelight::host::{NullRenderer, StaticSymbolProvider};

fn print_usage() {
    println!(
        "limelight {}, a scope spotlight engine.",
        env!("CARGO_PKG_VERSION")
    );
    print!(
        r#"
Usage: limelight [OPTIONS]

Available options:

--inspect FILE               Report the resolution outcome for FILE
--symbols FILE               JSON symbol tree for the inspected document
--cursor LINE:COL            Zero-based cursor position (default 0:0)
--language TAG               Host language tag, e.g. rust or python
                             (default: guessed from the file extension)
--version                    Print the version
--help                       Print this help message

"#
    );
}

fn parse_cursor(arg: &str) -> anyhow::Result<Position> {
    let (line, character) = arg
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Cursor must be LINE:COL, got '{arg}'"))?;
    Ok(Position::new(line.trim().parse()?, character.trim().parse()?))
}

fn guess_language(path: &str) -> String {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext {
        "rs" => "rust",
        "ts" => "typescript",
        "tsx" => "typescriptreact",
        "js" => "javascript",
        "jsx" => "javascriptreact",
        "py" => "python",
        "go" => "go",
        other => other,
    }
    .to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut argv = std::env::args();
    argv.next(); // skip executable name

    let mut inspect: Option<String> = None;
    let mut symbols: Option<String> = None;
    let mut cursor = Position::new(0, 0);
    let mut language: Option<String> = None;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--inspect" => inspect = argv.next(),
            "--symbols" => symbols = argv.next(),
            "--cursor" => {
                let value = argv
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--cursor needs LINE:COL"))?;
                cursor = parse_cursor(&value)?;
            }
            "--language" => language = argv.next(),
            "--version" => {
                println!("limelight {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("Unknown argument: '{other}'"));
            }
        }
    }

    let Some(path) = inspect else {
        print_usage();
        return Ok(());
    };

    env_logger::init();

    let text = fs::read_to_string(&path)?;
    let tag = language.unwrap_or_else(|| guess_language(&path));
    let doc = Document::new(&text, &tag);

    let tree: Vec<DocumentSymbol> = match symbols {
        Some(symbols_path) => serde_json::from_str(&fs::read_to_string(&symbols_path)?)?,
        None => Vec::new(),
    };

    let controller = SpotlightController::new(
        Arc::new(StaticSymbolProvider::new(tree)),
        Arc::new(NullRenderer::default()),
        SpotlightConfig::default(),
    );

    let uri = Url::from_file_path(fs::canonicalize(&path)?)
        .map_err(|_| anyhow::anyhow!("Cannot build a file URI for '{path}'"))?;
    let report = controller.inspect(&doc, &uri, cursor).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
