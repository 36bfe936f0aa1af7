//! Interactive planner shell.
//!
//! A numbered-menu front end over [`PlannerState`]: create and open layout
//! files, edit placements field by field, and export drawings. Prompts show
//! the current value where one exists, so pressing Enter keeps it, and 'b'
//! backs out of whatever flow is in progress. Length prompts accept decimal
//! feet or feet-and-inches notation (`12'6"`).

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use yardplan_core::{constants, parse_feet, Error, Result};
use yardplan_layout::{
    annotate_object, LabelFormat, PlacedObject, PlannerState, PointMarker, RectObject, Yard,
};
use yardplan_settings::Config;

/// Runs the main menu until the user exits.
///
/// The configuration is written back to `config_path` on the way out so
/// recent files survive the session.
pub fn run_menu(config: &mut Config, config_path: &Path) -> Result<()> {
    config.ensure_directories()?;
    println!("YardPlan {} - to-scale property layouts", crate::VERSION);

    loop {
        println!();
        println!("Main Menu:");
        println!("1. Create new layout");
        println!("2. Open layout from file");
        println!("3. Edit layout objects");
        println!("4. Export drawings");
        println!("5. Exit");

        let choice = match prompt("Select an option") {
            Ok(choice) => choice,
            Err(err) if is_eof(&err) => break,
            Err(err) => return Err(err),
        };

        let outcome = match choice.as_str() {
            "1" => create_layout(config),
            "2" => open_layout(config),
            "3" => edit_layout(config),
            "4" => export_layout(config),
            "5" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        match outcome {
            Ok(()) => {}
            Err(err) if is_eof(&err) => break,
            Err(err) => println!("Error: {}", err),
        }
    }

    if let Err(err) = config.save_to_file(config_path) {
        warn!("Could not save configuration: {}", err);
    }
    println!("Goodbye.");
    Ok(())
}

/// Opens a layout file and applies the configured editor behavior.
pub fn open_planner(config: &Config, path: &Path) -> Result<PlannerState> {
    let mut state = PlannerState::open(path)?;
    state.autosave = config.editor.autosave;
    state.label_format = label_format(config);
    state.canvas_size_px = (config.render.canvas_width, config.render.canvas_height);
    Ok(state)
}

/// Runs the object editor menu until the user goes back.
///
/// With autosave on every successful edit already sits on disk; otherwise
/// the user is offered a save on the way out.
pub fn run_editor(state: &mut PlannerState) -> Result<()> {
    loop {
        let names: Vec<String> = state
            .layout
            .objects()
            .iter()
            .map(|o| o.name().to_string())
            .collect();
        let base = names.len();

        println!();
        println!("Editing {}:", state.display_name());
        println!("Which object would you like to edit?");
        for (i, name) in names.iter().enumerate() {
            println!("{}. {}", i + 1, name);
        }
        println!("{}. Add a new object", base + 1);
        println!("{}. Remove an object", base + 2);
        println!("{}. Show distances", base + 3);
        println!("{}. Resize yard", base + 4);
        println!("{}. Back to main menu", base + 5);

        let entry = prompt("Select an option")?;
        let Ok(choice) = entry.parse::<usize>() else {
            println!("Invalid option. Please try again.");
            continue;
        };

        if choice >= 1 && choice <= base {
            edit_object(state, &names[choice - 1])?;
        } else if choice == base + 1 {
            add_object(state)?;
        } else if choice == base + 2 {
            remove_object(state)?;
        } else if choice == base + 3 {
            show_layout(state)?;
        } else if choice == base + 4 {
            resize_yard(state)?;
        } else if choice == base + 5 {
            break;
        } else {
            println!("Invalid option. Please try again.");
        }
    }

    if state.is_modified {
        let entry = prompt("Save changes? (y/n)")?;
        if entry.eq_ignore_ascii_case("y") {
            state.save()?;
            println!("Changes saved successfully.");
        }
    }
    Ok(())
}

/// Prints the yard, every object and its property-line distances.
pub fn show_layout(state: &PlannerState) -> Result<()> {
    let yard = *state.layout.yard();
    println!();
    println!(
        "{}: {} x {} ft yard",
        state.display_name(),
        yard.front_width,
        yard.left_depth
    );

    if state.layout.is_empty() {
        println!("No objects placed yet.");
        return Ok(());
    }

    for annotation in state.annotations()? {
        let Some(obj) = state.layout.get(&annotation.name) else {
            continue;
        };
        println!();
        match obj {
            PlacedObject::Rect(rect) => {
                if rect.rotation.degrees() == 0 {
                    println!("{} ({} x {} ft)", rect.name, rect.width, rect.height);
                } else {
                    println!(
                        "{} ({} x {} ft, rotated {} deg)",
                        rect.name,
                        rect.width,
                        rect.height,
                        rect.rotation.degrees()
                    );
                }
            }
            PlacedObject::Point(marker) => println!("{} (point marker)", marker.name),
        }
        for line in &annotation.lines {
            println!("  {}", line.label_text);
        }
    }
    Ok(())
}

/// Exports the canvas PNG and print SVG into the prints directory, named
/// after the layout file.
pub fn export_drawings(state: &PlannerState, config: &Config) -> Result<()> {
    let Some(layout_path) = state.current_file_path.clone() else {
        return Ok(());
    };

    config.ensure_directories()?;
    let png = config.export_path_for_layout(&layout_path, "png");
    let svg = config.export_path_for_layout(&layout_path, "svg");
    state.export_png(&png)?;
    state.export_svg(&svg)?;
    println!("Exported {} and {}.", png.display(), svg.display());
    Ok(())
}

fn create_layout(config: &mut Config) -> Result<()> {
    println!();
    println!("Tip: enter 'b' at any prompt to go back.");

    let Some(name) = prompt_text("Layout name")? else {
        return Ok(());
    };

    let yard = loop {
        println!();
        println!("Enter property boundary dimensions (in feet):");
        let Some(front_width) = prompt_number_with_default(
            "Front boundary width (left to right)",
            config.editor.default_front_width_ft,
        )?
        else {
            return Ok(());
        };
        let Some(left_depth) = prompt_number_with_default(
            "Left boundary depth (front to back)",
            config.editor.default_left_depth_ft,
        )?
        else {
            return Ok(());
        };
        match Yard::new(front_width, left_depth) {
            Ok(yard) => break yard,
            Err(err) => println!("{}. Try again or enter 'b' to go back.", err),
        }
    };

    let mut state = PlannerState::new(name.clone(), yard);
    state.autosave = config.editor.autosave;
    state.label_format = label_format(config);
    state.canvas_size_px = (config.render.canvas_width, config.render.canvas_height);

    let default_path = config.layout_path(&name);
    let entry = prompt(&format!("Save as [{}]", default_path.display()))?;
    let path = if entry.is_empty() {
        default_path
    } else {
        PathBuf::from(entry)
    };

    state.save_as(&path)?;
    config.add_recent_file(path.clone());
    println!("Created {}.", path.display());

    run_editor(&mut state)?;
    export_drawings(&state, config)
}

fn open_layout(config: &mut Config) -> Result<()> {
    let Some(path) = choose_layout_file(config)? else {
        return Ok(());
    };

    let state = open_planner(config, &path)?;
    config.add_recent_file(path);
    println!("Layout loaded successfully.");

    show_layout(&state)?;
    export_drawings(&state, config)
}

fn edit_layout(config: &mut Config) -> Result<()> {
    let Some(path) = choose_layout_file(config)? else {
        return Ok(());
    };

    let mut state = open_planner(config, &path)?;
    config.add_recent_file(path);

    run_editor(&mut state)?;
    export_drawings(&state, config)
}

fn export_layout(config: &mut Config) -> Result<()> {
    let Some(path) = choose_layout_file(config)? else {
        return Ok(());
    };

    let state = open_planner(config, &path)?;
    config.add_recent_file(path);
    export_drawings(&state, config)
}

/// Lists the layouts directory plus any surviving recent files and lets the
/// user pick by number or type a path.
fn choose_layout_file(config: &Config) -> Result<Option<PathBuf>> {
    let mut entries: Vec<PathBuf> = Vec::new();
    if let Ok(dir) = std::fs::read_dir(&config.directories.layouts_dir) {
        for entry in dir.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                entries.push(path);
            }
        }
    }
    entries.sort();
    for recent in &config.recent_files {
        if recent.exists() && !entries.contains(recent) {
            entries.push(recent.clone());
        }
    }

    if entries.is_empty() {
        println!(
            "No layouts found in {}.",
            config.directories.layouts_dir.display()
        );
    } else {
        println!();
        for (i, path) in entries.iter().enumerate() {
            println!("{}. {}", i + 1, path.display());
        }
    }

    loop {
        let entry = prompt("Select a layout (number or path, 'b' to go back)")?;
        if entry.is_empty() || entry.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        if let Ok(index) = entry.parse::<usize>() {
            if (1..=entries.len()).contains(&index) {
                return Ok(Some(entries[index - 1].clone()));
            }
            println!("Invalid choice. Please try again.");
            continue;
        }
        return Ok(Some(PathBuf::from(entry)));
    }
}

/// Edits one object field by field. Each accepted value is applied (and
/// autosaved) on its own, so a rejected field keeps the previous placement
/// without touching the rest.
fn edit_object(state: &mut PlannerState, name: &str) -> Result<()> {
    let Some(obj) = state.layout.get(name).cloned() else {
        println!("No object named '{}'.", name);
        return Ok(());
    };

    println!();
    println!("Editing {}:", name);

    match obj {
        PlacedObject::Rect(rect) => {
            let width =
                prompt_number_or_keep(&format!("{} width (left to right)", name), rect.width)?;
            let height =
                prompt_number_or_keep(&format!("{} depth (front to back)", name), rect.height)?;
            if width != rect.width || height != rect.height {
                report(state.resize_object(name, width, height));
            }

            let x = prompt_number_or_keep(
                &format!("Distance from left property line to {}", name.to_lowercase()),
                rect.x,
            )?;
            let y = prompt_number_or_keep(
                &format!(
                    "Distance from front property line to {}",
                    name.to_lowercase()
                ),
                rect.y,
            )?;
            if x != rect.x || y != rect.y {
                report(state.move_object(name, x, y));
            }

            let current = rect.rotation.degrees();
            let rotation =
                prompt_number_or_keep("Rotation (0, 90, 180, or 270)", f64::from(current))?;
            let delta = rotation as i32 - current;
            if delta != 0 {
                report(state.rotate_object(name, delta));
            }
        }
        PlacedObject::Point(marker) => {
            let x = prompt_number_or_keep(
                &format!("Distance from left property line to {}", name.to_lowercase()),
                marker.x,
            )?;
            let y = prompt_number_or_keep(
                &format!(
                    "Distance from front property line to {}",
                    name.to_lowercase()
                ),
                marker.y,
            )?;
            if x != marker.x || y != marker.y {
                report(state.move_object(name, x, y));
            }

            let radius = prompt_number_or_keep("Marker radius (drawing only)", marker.radius)?;
            if radius != marker.radius {
                report(state.resize_marker(name, radius));
            }
        }
    }

    print_distances(state, name)
}

fn add_object(state: &mut PlannerState) -> Result<()> {
    println!();
    println!("Which kind of object?");
    println!("1. Rectangle (house, shed, garage)");
    println!("2. Point marker (well, septic tank)");
    println!("3. Back");

    match prompt("Select an option")?.as_str() {
        "1" => add_rectangle(state),
        "2" => add_marker(state),
        "3" => Ok(()),
        _ => {
            println!("Invalid option. Please try again.");
            Ok(())
        }
    }
}

fn add_rectangle(state: &mut PlannerState) -> Result<()> {
    let Some(name) = prompt_text("Object name")? else {
        return Ok(());
    };

    println!();
    println!(
        "Enter {} dimensions and placement (in feet):",
        name.to_lowercase()
    );
    let Some(width) = prompt_number(&format!("{} width (left to right)", name))? else {
        return Ok(());
    };
    let Some(height) = prompt_number(&format!("{} depth (front to back)", name))? else {
        return Ok(());
    };
    let Some(x) = prompt_number(&format!(
        "Distance from left property line to {}",
        name.to_lowercase()
    ))?
    else {
        return Ok(());
    };
    let Some(y) = prompt_number(&format!(
        "Distance from front property line to {}",
        name.to_lowercase()
    ))?
    else {
        return Ok(());
    };

    let rect = match RectObject::new(name.clone(), x, y, width, height) {
        Ok(rect) => rect,
        Err(err) => {
            println!("Could not place {}: {}", name, err);
            return Ok(());
        }
    };
    match state.add_object(PlacedObject::Rect(rect)) {
        Ok(()) => {
            println!("Placed {}.", name);
            print_distances(state, &name)?;
        }
        Err(err) => println!("Could not place {}: {}", name, err),
    }
    Ok(())
}

fn add_marker(state: &mut PlannerState) -> Result<()> {
    let Some(name) = prompt_text("Object name")? else {
        return Ok(());
    };

    println!();
    println!("Enter {} location (in feet):", name.to_lowercase());
    let Some(x) = prompt_number(&format!(
        "Distance from left property line to {}",
        name.to_lowercase()
    ))?
    else {
        return Ok(());
    };
    let Some(y) = prompt_number(&format!(
        "Distance from front property line to {}",
        name.to_lowercase()
    ))?
    else {
        return Ok(());
    };
    let radius = prompt_number_or_keep(
        "Marker radius (drawing only)",
        constants::DEFAULT_MARKER_RADIUS_FT,
    )?;

    let marker = match PointMarker::new(name.clone(), x, y, radius) {
        Ok(marker) => marker,
        Err(err) => {
            println!("Could not place {}: {}", name, err);
            return Ok(());
        }
    };
    match state.add_object(PlacedObject::Point(marker)) {
        Ok(()) => {
            println!("Placed {}.", name);
            print_distances(state, &name)?;
        }
        Err(err) => println!("Could not place {}: {}", name, err),
    }
    Ok(())
}

fn remove_object(state: &mut PlannerState) -> Result<()> {
    if state.layout.is_empty() {
        println!("No objects to remove.");
        return Ok(());
    }
    let Some(name) = prompt_text("Object to remove")? else {
        return Ok(());
    };
    match state.remove_object(&name) {
        Ok(removed) => println!("Removed {}.", removed.name()),
        Err(err) => println!("{}", err),
    }
    Ok(())
}

fn resize_yard(state: &mut PlannerState) -> Result<()> {
    let yard = *state.layout.yard();
    println!();
    println!("Enter property boundary dimensions (in feet):");
    let front_width =
        prompt_number_or_keep("Front boundary width (left to right)", yard.front_width)?;
    let left_depth =
        prompt_number_or_keep("Left boundary depth (front to back)", yard.left_depth)?;
    if front_width == yard.front_width && left_depth == yard.left_depth {
        return Ok(());
    }

    match state.resize_yard(front_width, left_depth) {
        Ok(()) => println!("Yard is now {} x {} ft.", front_width, left_depth),
        Err(err) => println!("{}. Keeping previous.", err),
    }
    Ok(())
}

fn print_distances(state: &PlannerState, name: &str) -> Result<()> {
    let Some(obj) = state.layout.get(name) else {
        return Ok(());
    };
    let annotation = annotate_object(state.layout.yard(), obj, &state.label_format)?;
    for line in &annotation.lines {
        println!("  {}", line.label_text);
    }
    Ok(())
}

/// Prints a rejected edit; the store is unchanged when one is returned.
fn report(outcome: Result<()>) {
    if let Err(err) = outcome {
        println!("{}. Keeping previous.", err);
    }
}

/// Measurement label format taken from the render settings.
fn label_format(config: &Config) -> LabelFormat {
    LabelFormat {
        precision: config.render.label_precision,
        unit_suffix: config.render.unit_suffix.clone(),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    let n = io::stdin().read_line(&mut line)?;
    if n == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed").into());
    }
    Ok(line.trim().to_string())
}

/// Free-text prompt; empty input or 'b' backs out.
fn prompt_text(label: &str) -> Result<Option<String>> {
    let entry = prompt(label)?;
    if entry.is_empty() || entry.eq_ignore_ascii_case("b") {
        return Ok(None);
    }
    Ok(Some(entry))
}

/// Numeric prompt; 'b' backs out, anything unparseable re-asks.
fn prompt_number(label: &str) -> Result<Option<f64>> {
    loop {
        let entry = prompt(label)?;
        if entry.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        if entry.is_empty() {
            println!("Invalid number. Please enter a number or 'b' to go back.");
            continue;
        }
        match parse_feet(&entry) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Invalid number. Please enter a number or 'b' to go back."),
        }
    }
}

/// Numeric prompt with a default; empty input takes the default, 'b' backs
/// out.
fn prompt_number_with_default(label: &str, default: f64) -> Result<Option<f64>> {
    loop {
        let entry = prompt(&format!("{} ({})", label, default))?;
        if entry.is_empty() {
            return Ok(Some(default));
        }
        if entry.eq_ignore_ascii_case("b") {
            return Ok(None);
        }
        match parse_feet(&entry) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Invalid number. Please enter a number or 'b' to go back."),
        }
    }
}

/// Edit prompt showing the current value; empty or invalid input keeps it.
fn prompt_number_or_keep(label: &str, current: f64) -> Result<f64> {
    let entry = prompt(&format!("{} ({})", label, current))?;
    if entry.is_empty() {
        return Ok(current);
    }
    match parse_feet(&entry) {
        Ok(value) => Ok(value),
        Err(_) => {
            println!("Invalid value. Keeping previous.");
            Ok(current)
        }
    }
}

fn is_eof(err: &Error) -> bool {
    matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}
