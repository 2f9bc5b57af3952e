//! `stringart` command line entry point.
//!
//! ```text
//! stringart info <doc.json>
//! stringart export <doc.json> <out.svg>
//! stringart store <doc.json> <name>
//! stringart fetch <name> <out.json>
//! stringart list
//! stringart remove <name>
//! ```
//!
//! Stored scenes live in the platform data directory.

use anyhow::{Context, Result, bail};
use pollster::block_on;
use std::path::{Path, PathBuf};
use stringart_core::{FileStorage, Scene, SceneDocument, Storage, StorageError, to_svg};

const USAGE: &str = "usage: stringart info <doc.json> | export <doc.json> <out.svg> \
                     | store <doc.json> <name> | fetch <name> <out.json> | list | remove <name>";

#[derive(Debug, PartialEq)]
enum Command {
    Info(PathBuf),
    Export { input: PathBuf, output: PathBuf },
    Store { input: PathBuf, name: String },
    Fetch { name: String, output: PathBuf },
    List,
    Remove(String),
}

impl Command {
    fn uses_storage(&self) -> bool {
        !matches!(self, Command::Info(_) | Command::Export { .. })
    }
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [cmd, input] if cmd == "info" => Ok(Command::Info(input.into())),
        [cmd, input, output] if cmd == "export" => Ok(Command::Export {
            input: input.into(),
            output: output.into(),
        }),
        [cmd, input, name] if cmd == "store" => Ok(Command::Store {
            input: input.into(),
            name: name.clone(),
        }),
        [cmd, name, output] if cmd == "fetch" => Ok(Command::Fetch {
            name: name.clone(),
            output: output.into(),
        }),
        [cmd] if cmd == "list" => Ok(Command::List),
        [cmd, name] if cmd == "remove" => Ok(Command::Remove(name.clone())),
        _ => bail!("{USAGE}"),
    }
}

fn load_scene(path: &Path) -> Result<Scene> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = SceneDocument::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
    document
        .to_scene()
        .with_context(|| format!("Invalid document {}", path.display()))
}

fn write_document(scene: &Scene, path: &Path) -> Result<()> {
    let json = SceneDocument::from_scene(scene).to_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn summary(scene: &Scene) -> String {
    let mut text = format!("lines: {}\nfans: {}\n", scene.line_count(), scene.fan_count());
    if let Some(bounds) = scene.bounds() {
        text.push_str(&format!(
            "bounds: ({:.1}, {:.1}) - ({:.1}, {:.1}), {:.1}mm x {:.1}mm\n",
            bounds.x0,
            bounds.y0,
            bounds.x1,
            bounds.y1,
            bounds.width(),
            bounds.height()
        ));
    }
    text
}

/// One listing row per stored scene. Damaged entries are listed with the
/// reason instead of aborting the listing.
fn listing(storage: &dyn Storage) -> Result<String> {
    let mut text = String::new();
    for name in block_on(storage.names())? {
        let row = match block_on(storage.load_scene(&name)) {
            Ok(scene) => format!("{name}: {} lines, {} fans\n", scene.line_count(), scene.fan_count()),
            Err(StorageError::Damaged { source, .. }) => format!("{name}: damaged ({source})\n"),
            Err(e) => return Err(e.into()),
        };
        text.push_str(&row);
    }
    Ok(text)
}

fn run_with(command: Command, storage: Option<&dyn Storage>) -> Result<()> {
    let storage = || storage.context("Scene storage is not available");
    match command {
        Command::Info(input) => {
            let scene = load_scene(&input)?;
            print!("{}", summary(&scene));
        }
        Command::Export { input, output } => {
            let scene = load_scene(&input)?;
            let svg = to_svg(&scene).with_context(|| format!("Cannot export {}", input.display()))?;
            std::fs::write(&output, svg).with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Wrote {}", output.display());
        }
        Command::Store { input, name } => {
            let scene = load_scene(&input)?;
            block_on(storage()?.save_scene(&name, &scene))?;
        }
        Command::Fetch { name, output } => {
            let scene = block_on(storage()?.load_scene(&name))?;
            write_document(&scene, &output)?;
            log::info!("Wrote {}", output.display());
        }
        Command::List => print!("{}", listing(storage()?)?),
        Command::Remove(name) => {
            if !block_on(storage()?.remove(&name))? {
                bail!("No stored scene named {name:?}");
            }
        }
    }
    Ok(())
}

fn run(command: Command) -> Result<()> {
    if !command.uses_storage() {
        return run_with(command, None);
    }
    let storage = FileStorage::default_location()?;
    log::debug!("Scene storage at {}", storage.dir().display());
    run_with(command, Some(&storage))
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    run(parse_args(&args)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringart_core::{Fan, Line, MemoryStorage, StringColor, Vector};
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        let a = scene.add_line(Line::new(Vector::new(0.0, 0.0), Vector::new(0.0, 40.0)));
        let b = scene.add_line(Line::new(Vector::new(60.0, 0.0), Vector::new(60.0, 40.0)));
        scene.add_fan(Fan::new(a, b, StringColor::default(), 1.0, 5));
        scene
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&["info", "a.json"])).unwrap(), Command::Info("a.json".into()));
        assert_eq!(
            parse_args(&args(&["export", "a.json", "b.svg"])).unwrap(),
            Command::Export {
                input: "a.json".into(),
                output: "b.svg".into()
            }
        );
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["export", "a.json"])).is_err());
    }

    #[test]
    fn test_parse_storage_args() {
        assert_eq!(
            parse_args(&args(&["store", "a.json", "star"])).unwrap(),
            Command::Store {
                input: "a.json".into(),
                name: "star".into()
            }
        );
        assert_eq!(
            parse_args(&args(&["fetch", "star", "b.json"])).unwrap(),
            Command::Fetch {
                name: "star".into(),
                output: "b.json".into()
            }
        );
        assert_eq!(parse_args(&args(&["list"])).unwrap(), Command::List);
        assert_eq!(parse_args(&args(&["remove", "star"])).unwrap(), Command::Remove("star".into()));
        assert!(parse_args(&args(&["list", "extra"])).is_err());
        assert!(!Command::Info("a.json".into()).uses_storage());
        assert!(Command::List.uses_storage());
    }

    #[test]
    fn test_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_document(&sample_scene(), &path).unwrap();
        let text = summary(&load_scene(&path).unwrap());
        assert!(text.contains("lines: 2"));
        assert!(text.contains("fans: 1"));
        assert!(text.contains("60.0mm x 40.0mm"));
    }

    #[test]
    fn test_export_writes_svg() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.json");
        let output = dir.path().join("out.svg");
        write_document(&sample_scene(), &input).unwrap();

        run(Command::Export {
            input,
            output: output.clone(),
        })
        .unwrap();
        let svg = std::fs::read_to_string(output).unwrap();
        assert!(svg.contains(r#"width="60.000mm""#));
    }

    #[test]
    fn test_missing_input_reports_path() {
        let err = load_scene(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.json"));
    }

    #[test]
    fn test_store_fetch_remove() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.json");
        let output = dir.path().join("copy.json");
        write_document(&sample_scene(), &input).unwrap();
        let storage = MemoryStorage::new();

        let store = Command::Store {
            input,
            name: "harp".into(),
        };
        run_with(store, Some(&storage)).unwrap();
        assert_eq!(listing(&storage).unwrap(), "harp: 2 lines, 1 fans\n");

        let fetch = Command::Fetch {
            name: "harp".into(),
            output: output.clone(),
        };
        run_with(fetch, Some(&storage)).unwrap();
        assert_eq!(load_scene(&output).unwrap().fan_count(), 1);

        run_with(Command::Remove("harp".into()), Some(&storage)).unwrap();
        assert!(run_with(Command::Remove("harp".into()), Some(&storage)).is_err());
        assert_eq!(listing(&storage).unwrap(), "");
    }

    #[test]
    fn test_listing_marks_damaged_scene() {
        let storage = MemoryStorage::new();
        block_on(storage.save_scene("good", &sample_scene())).unwrap();
        block_on(storage.write("junk", "[1, 2".to_string())).unwrap();

        let text = listing(&storage).unwrap();
        assert!(text.starts_with("good: 2 lines, 1 fans\n"));
        assert!(text.contains("junk: damaged ("));
    }

    #[test]
    fn test_store_rejects_bad_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.json");
        write_document(&sample_scene(), &input).unwrap();
        let storage = MemoryStorage::new();

        let store = Command::Store {
            input,
            name: "../outside".into(),
        };
        let err = run_with(store, Some(&storage)).unwrap_err();
        assert!(err.to_string().contains("Invalid scene name"));
    }

    #[test]
    fn test_storage_command_without_storage() {
        assert!(run_with(Command::List, None).is_err());
    }
}
