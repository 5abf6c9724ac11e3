use std::path::PathBuf;

use crate::calc;
use crate::config;
use crate::model::catalog::{self, FIRST_AID_GUIDE, RECIPES, community_templates};
use crate::model::project::{BodyType, MealType, Project, Role, Season, TripType};
use crate::ops::{OpError, diary_ops, gear_ops, meal_ops, project_ops};
use crate::remote::RemoteSync;
use crate::store::{self, Notice, NoticeKind, Store, sync};
use crate::util::ids::is_local_id;
use crate::validate::ValidationError;

use super::commands::*;
use super::output::{self, *};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = match &cli.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => store::default_data_dir(),
    };

    let mut store = Store::open(&dir);

    let result = match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cmd_status(&store, json),
        Commands::Project(args) => cmd_project(&mut store, args.action, json),
        Commands::Participant(args) => cmd_participant(&mut store, args.action, json),
        Commands::Chat(args) => cmd_chat(&mut store, args.action),
        Commands::Gear(args) => cmd_gear(&mut store, args.action, json),
        Commands::Meal(args) => cmd_meal(&mut store, args.action, json),
        Commands::Template(args) => cmd_template(&mut store, args.action, json),
        Commands::Diary(args) => cmd_diary(&mut store, args.action),
        Commands::Checklist => cmd_checklist(&store, json),
        Commands::Weight => cmd_weight(&store, json),
        Commands::Nutrition => cmd_nutrition(&store, json),
        Commands::Water(args) => cmd_water(&mut store, args, json),
        Commands::Dishes => cmd_dishes(json),
        Commands::Guide => cmd_guide(),
        Commands::Sync(args) => cmd_sync(&mut store, args.action),
        Commands::Remote(args) => cmd_remote(&mut store, args.action),
    };

    output::print_notices(&store.take_notices(), json);
    result
}

/// Run a fallible operation against the current project inside a commit.
/// `Ok(None)` means there was no current project to operate on.
fn with_current<T>(
    store: &mut Store,
    mutate: impl FnOnce(&mut Project) -> Result<T, OpError>,
) -> Result<Option<T>, OpError> {
    match store.with_current_project(mutate) {
        Some(Ok(value)) => Ok(Some(value)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

fn parse_variant<T>(
    field: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, OpError> {
    parse(value).ok_or_else(|| {
        OpError::Validation(ValidationError::UnknownVariant {
            field,
            value: value.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// Status and read views
// ---------------------------------------------------------------------------

fn cmd_status(store: &Store, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(project) = store.current_project() else {
        println!("no current project");
        return Ok(());
    };

    let totals = calc::project_totals(project);
    let status = StatusJson {
        project: project.title.clone(),
        project_id: project.id.clone(),
        projects: store.state().projects.len(),
        participants: project.participants.len(),
        gear_kg: calc::gear_weight(project),
        calories: totals.calories,
        duration_days: calc::duration_days(project),
    };

    if json {
        print_json(&status);
    } else {
        println!("{} ({})", status.project, status.project_id);
        println!(
            "  {} day(s), {} participant(s), {} project(s) total",
            status.duration_days, status.participants, status.projects
        );
        println!(
            "  gear {:.1} kg, food {:.0} kcal",
            status.gear_kg, status.calories
        );
    }
    Ok(())
}

fn cmd_checklist(store: &Store, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(project) = store.current_project() else {
        println!("no current project");
        return Ok(());
    };

    let rows = calc::build_checklist(project);
    let done = calc::done_count(&rows);

    if json {
        print_json(&ChecklistJson {
            done,
            total: rows.len(),
            rows: rows.iter().map(ChecklistRowJson::from).collect(),
        });
    } else {
        println!("done {} / {}", done, rows.len());
        for row in &rows {
            println!(
                "[{}] {}  {}  ({})",
                if row.done { "x" } else { " " },
                row.id,
                row.title,
                row.owner
            );
        }
    }
    Ok(())
}

fn cmd_weight(store: &Store, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(project) = store.current_project() else {
        println!("no current project");
        return Ok(());
    };

    let report = calc::weight_report(project);
    if json {
        print_json(&WeightJson::from(&report));
    } else {
        println!(
            "gear {:.1} kg, peak carry {:.1} kg, limit {:.0} kg ({})",
            report.gear_kg,
            report.max_carry_kg,
            report.limit_kg,
            if report.overweight {
                "OVER the recommended limit"
            } else {
                "within limits"
            }
        );
        for day in &report.daily_carry {
            println!("{}", day_weight_line(day));
        }
        if !report.heaviest.is_empty() {
            let heaviest: Vec<String> = report
                .heaviest
                .iter()
                .map(|(name, kg)| format!("{} ({:.1} kg)", name, kg))
                .collect();
            println!("heaviest: {}", heaviest.join(", "));
        }
    }
    Ok(())
}

fn cmd_nutrition(store: &Store, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(project) = store.current_project() else {
        println!("no current project");
        return Ok(());
    };

    let totals = calc::project_totals(project);
    if json {
        print_json(&NutritionJson::from(totals));
    } else {
        println!(
            "{:.0} kcal total — {:.0} g food, protein {:.0} g, fat {:.0} g, carbs {:.0} g",
            totals.calories, totals.grams, totals.protein, totals.fat, totals.carbs
        );
    }
    Ok(())
}

fn cmd_dishes(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        #[derive(serde::Serialize)]
        struct DishJson {
            id: &'static str,
            name: &'static str,
            kcal_per_person: f64,
        }
        let dishes: Vec<DishJson> = RECIPES
            .iter()
            .map(|recipe| DishJson {
                id: recipe.id,
                name: recipe.name,
                kcal_per_person: per_person_kcal(recipe),
            })
            .collect();
        print_json(&dishes);
    } else {
        for recipe in RECIPES {
            println!(
                "{}  {} ({:.0} kcal/person)",
                recipe.id,
                recipe.name,
                per_person_kcal(recipe)
            );
        }
    }
    Ok(())
}

fn per_person_kcal(recipe: &catalog::Recipe) -> f64 {
    recipe
        .ingredients
        .iter()
        .map(|i| i.grams_per_person / 100.0 * i.kcal_per_100)
        .sum()
}

fn cmd_guide() -> Result<(), Box<dyn std::error::Error>> {
    for topic in FIRST_AID_GUIDE {
        println!("{}", topic.title);
        println!("  {}", topic.steps);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project commands
// ---------------------------------------------------------------------------

fn cmd_project(
    store: &mut Store,
    action: ProjectAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProjectAction::List => {
            let current_id = store.state().current_project_id.clone();
            if json {
                let projects: Vec<ProjectJson> = store
                    .state()
                    .projects
                    .iter()
                    .map(|p| ProjectJson::from_project(p, p.id == current_id))
                    .collect();
                print_json(&projects);
            } else {
                for project in &store.state().projects {
                    println!(
                        "{} {}  {}  {} {}",
                        if project.id == current_id { "*" } else { " " },
                        project.id,
                        project.title,
                        project.trip_type,
                        project.season
                    );
                }
            }
        }
        ProjectAction::Create { title, start, end } => {
            let id = store.commit(|state| project_ops::create_project(state, &title, &start, &end))?;
            println!("created {}", id);
        }
        ProjectAction::Delete { id } => {
            store.commit(|state| project_ops::delete_project(state, &id))?;
            store.push_notice(Notice::new("Project deleted", NoticeKind::Warn));
        }
        ProjectAction::Switch { id } => {
            store.commit(|state| project_ops::switch_project(state, &id))?;
            println!("switched to {}", id);
        }
        ProjectAction::Set {
            title,
            start,
            end,
            trip_type,
            season,
            body,
        } => {
            let update = project_ops::SettingsUpdate {
                title,
                dates: start.zip(end),
                trip_type: trip_type
                    .as_deref()
                    .map(|v| parse_variant("trip type", v, TripType::parse))
                    .transpose()?,
                season: season
                    .as_deref()
                    .map(|v| parse_variant("season", v, Season::parse))
                    .transpose()?,
                body_type: body
                    .as_deref()
                    .map(|v| parse_variant("body type", v, BodyType::parse))
                    .transpose()?,
            };
            if with_current(store, |project| project_ops::update_settings(project, update))?
                .is_none()
            {
                println!("no current project");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Participants and chat
// ---------------------------------------------------------------------------

fn cmd_participant(
    store: &mut Store,
    action: ParticipantAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ParticipantAction::List => {
            let Some(project) = store.current_project() else {
                println!("no current project");
                return Ok(());
            };
            if json {
                print_json(&project.participants);
            } else {
                for participant in &project.participants {
                    println!("{}", participant_line(participant));
                }
            }
        }
        ParticipantAction::Add { name, role } => {
            let role = parse_variant("role", &role, Role::parse)?;
            match with_current(store, |project| {
                project_ops::add_participant(project, &name, role)
            })? {
                Some(id) => println!("added {}", id),
                None => println!("no current project"),
            }
        }
        ParticipantAction::Remove { id } => {
            if with_current(store, |project| project_ops::remove_participant(project, &id))?
                .is_some()
            {
                store.push_notice(Notice::new("Participant removed", NoticeKind::Warn));
            }
        }
    }
    Ok(())
}

fn cmd_chat(store: &mut Store, action: ChatAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ChatAction::List => {
            let Some(project) = store.current_project() else {
                println!("no current project");
                return Ok(());
            };
            for message in &project.chat {
                println!(
                    "[{}] {}: {}",
                    message.created_at.format("%Y-%m-%d %H:%M"),
                    message.author,
                    message.message
                );
            }
        }
        ChatAction::Post { message, author } => {
            with_current(store, |project| {
                project_ops::post_chat_message(project, &author, &message)
            })?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Gear
// ---------------------------------------------------------------------------

fn cmd_gear(
    store: &mut Store,
    action: GearAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GearAction::List => {
            let Some(project) = store.current_project() else {
                println!("no current project");
                return Ok(());
            };
            if json {
                let items: Vec<GearJson> = project
                    .gear_items
                    .iter()
                    .map(|item| GearJson {
                        id: item.id.clone(),
                        name: item.name.clone(),
                        category: item.category.clone(),
                        weight_kg: item.weight_kg,
                        responsible: item
                            .responsible_id
                            .as_deref()
                            .and_then(|id| project.participant(id))
                            .map(|p| p.name.clone()),
                        packed: item.packed,
                    })
                    .collect();
                print_json(&items);
            } else {
                for item in &project.gear_items {
                    let owner = item
                        .responsible_id
                        .as_deref()
                        .and_then(|id| project.participant(id))
                        .map(|p| p.name.as_str());
                    println!("{}", gear_line(item, owner));
                }
            }
        }
        GearAction::Add {
            name,
            category,
            weight,
            responsible,
            hint,
        } => {
            match with_current(store, |project| {
                gear_ops::add_gear(
                    project,
                    &name,
                    &category,
                    weight,
                    responsible.as_deref(),
                    &hint,
                )
            })? {
                Some(id) => println!("added {}", id),
                None => println!("no current project"),
            }
        }
        GearAction::Remove { id } => {
            with_current(store, |project| gear_ops::remove_gear(project, &id))?;
        }
        GearAction::Pack { id, undo } => {
            with_current(store, |project| gear_ops::set_packed(project, &id, !undo))?;
        }
        GearAction::Assign { id, to } => {
            with_current(store, |project| {
                gear_ops::assign_responsible(project, &id, to.as_deref())
            })?;
        }
        GearAction::SetWeight { id, kg } => {
            with_current(store, |project| gear_ops::set_weight(project, &id, kg))?;
        }
        GearAction::Autofill => {
            match with_current(store, |project| Ok::<_, OpError>(gear_ops::autofill(project)))? {
                Some(added) => println!("added {} item(s)", added),
                None => println!("no current project"),
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Meals and templates
// ---------------------------------------------------------------------------

fn cmd_meal(
    store: &mut Store,
    action: MealAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MealAction::List => {
            let Some(project) = store.current_project() else {
                println!("no current project");
                return Ok(());
            };
            let people = calc::participant_count(project);
            let rows: Vec<MealJson> = project
                .meal_entries
                .iter()
                .map(|entry| {
                    let nutrition = calc::entry_nutrition(entry, people);
                    MealJson {
                        id: entry.id.clone(),
                        day: entry.day,
                        meal_type: entry.meal_type.to_string(),
                        dish: nutrition.dish_name.clone(),
                        servings: entry.servings,
                        packed: entry.packed,
                        calories: nutrition.calories,
                        grams: nutrition.grams,
                    }
                })
                .collect();

            if json {
                print_json(&rows);
            } else {
                for (entry, row) in project.meal_entries.iter().zip(&rows) {
                    println!("{}", meal_line(entry, &row.dish, row.calories));
                }
            }
        }
        MealAction::Add {
            dish,
            day,
            meal,
            servings,
        } => {
            let meal_type = parse_variant("meal type", &meal, MealType::parse)?;
            match with_current(store, |project| {
                meal_ops::add_meal(project, day, meal_type, &dish, servings)
            })? {
                Some(id) => println!("added {}", id),
                None => println!("no current project"),
            }
        }
        MealAction::Remove { id } => {
            with_current(store, |project| meal_ops::remove_meal(project, &id))?;
        }
        MealAction::Pack { id, undo } => {
            with_current(store, |project| meal_ops::set_packed(project, &id, !undo))?;
        }
        MealAction::Clear => {
            store.with_current_project(|project| meal_ops::clear_plan(project));
        }
    }
    Ok(())
}

fn cmd_template(
    store: &mut Store,
    action: TemplateAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TemplateAction::List => {
            let mut templates = community_templates();
            templates.extend(store.state().user_templates.iter().cloned());
            if json {
                print_json(&templates);
            } else {
                for template in &templates {
                    println!(
                        "{}  {}  {} {}  {} day(s), {} entr(ies)",
                        template.id,
                        template.name,
                        template.trip_type,
                        template.season,
                        template.days,
                        template.entries.len()
                    );
                }
            }
        }
        TemplateAction::Save { name } => {
            let id = store.commit(|state| meal_ops::save_template(state, &name))?;
            println!("saved {}", id);
        }
        TemplateAction::Apply { id } => {
            let name = store.commit(|state| meal_ops::apply_template(state, &id))?;
            store.push_notice(Notice::new(
                format!("Template \"{}\" applied", name),
                NoticeKind::Info,
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Diary
// ---------------------------------------------------------------------------

fn cmd_diary(store: &mut Store, action: DiaryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DiaryAction::List => {
            let Some(project) = store.current_project() else {
                println!("no current project");
                return Ok(());
            };
            let mut entries: Vec<_> = project.diary.iter().collect();
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            for entry in entries {
                let geotag = entry.geotag.as_deref().unwrap_or("-");
                println!(
                    "[{}] {}  {}  ({})",
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.id,
                    entry.text,
                    geotag
                );
            }
        }
        DiaryAction::Add { text, geotag, photo } => {
            match with_current(store, |project| {
                diary_ops::add_entry(project, &text, geotag.as_deref(), photo.as_deref())
            })? {
                Some(id) => println!("added {}", id),
                None => println!("no current project"),
            }
        }
        DiaryAction::Remove { id } => {
            with_current(store, |project| diary_ops::remove_entry(project, &id))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

fn cmd_water(
    store: &mut Store,
    args: WaterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let weather = parse_variant("weather", &args.weather, calc::Weather::parse)?;
    let activity = parse_variant("activity", &args.activity, calc::ActivityLevel::parse)?;

    let result = calc::water_need(weather, activity, args.hours, args.people);
    store.commit(|state| state.tools.water_calc = Some(result));

    if json {
        print_json(&result);
    } else {
        println!(
            "{:.1} l per person, {:.1} l total",
            result.per_person_liters, result.total_liters
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

fn cmd_sync(store: &mut Store, action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SyncAction::Status => {
            println!("origin {}", store.origin_id());
            match sync::read_signal(store.dir()) {
                Some(signal) => println!(
                    "last signal from {} at {}",
                    signal.origin_id,
                    signal.timestamp.format("%Y-%m-%d %H:%M:%S")
                ),
                None => println!("no change signal yet"),
            }
        }
        SyncAction::Poll => {
            // One reconciliation pass: adopt any state another instance
            // persisted since we loaded.
            match sync::read_signal(store.dir()) {
                Some(signal) if signal.origin_id != store.origin_id() => {
                    store.reconcile();
                    println!("reconciled with change from {}", signal.origin_id);
                }
                _ => println!("up to date"),
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

fn cmd_remote(store: &mut Store, action: RemoteAction) -> Result<(), Box<dyn std::error::Error>> {
    let app_config = config::load_config(store.dir());
    let identity = config::identity(&app_config);
    let mut remote = RemoteSync::new(app_config.remote.clone());

    if matches!(action, RemoteAction::Status) {
        println!(
            "remote: {}",
            app_config
                .remote
                .as_ref()
                .map(|r| r.base_url.as_str())
                .unwrap_or("not configured")
        );
        match &identity {
            Some(id) => println!("identity: {} ({})", id.external_id, id.display_name),
            None => println!("identity: none (local single-user mode)"),
        }
        let unsynced = store
            .state()
            .projects
            .iter()
            .filter(|p| is_local_id(&p.id))
            .count();
        println!("{} project(s) never synced", unsynced);
        return Ok(());
    }

    // Push and pull need an authenticated user; any failure falls back to
    // local-only continuation with a notice.
    let Some(identity) = identity else {
        store.push_notice(Notice::new(
            "No identity configured, staying local-only",
            NoticeKind::Warn,
        ));
        return Ok(());
    };
    if app_config.remote.is_none() {
        store.push_notice(Notice::new(
            "No remote configured, staying local-only",
            NoticeKind::Warn,
        ));
        return Ok(());
    }
    if let Err(e) = remote.authenticate_or_create_user(&identity) {
        store.push_notice(Notice::new(
            format!("Remote authentication failed, staying local-only: {}", e),
            NoticeKind::Error,
        ));
        return Ok(());
    }

    match action {
        RemoteAction::Push => {
            let projects = store.state().projects.clone();
            let mut pushed = 0;
            for project in projects {
                let result = if is_local_id(&project.id) {
                    remote.create_project(&project)
                } else {
                    remote.update_project(&project.id, &project)
                };
                match result {
                    Ok(stored) => {
                        pushed += 1;
                        // Adopt the server-assigned id for never-synced projects
                        if stored.id != project.id {
                            store.commit(|state| {
                                if let Some(pos) =
                                    state.projects.iter().position(|p| p.id == project.id)
                                {
                                    if state.current_project_id == project.id {
                                        state.current_project_id = stored.id.clone();
                                    }
                                    state.projects[pos] = stored;
                                }
                            });
                        }
                    }
                    Err(e) => {
                        store.push_notice(Notice::new(
                            format!("Could not push \"{}\": {}", project.title, e),
                            NoticeKind::Error,
                        ));
                    }
                }
            }
            println!("pushed {} project(s)", pushed);
        }
        RemoteAction::Pull => match remote.list_projects() {
            Ok(projects) if !projects.is_empty() => {
                let count = projects.len();
                store.commit(|state| {
                    state.projects = projects;
                    state.current_project_id = state.projects[0].id.clone();
                });
                println!("pulled {} project(s)", count);
            }
            Ok(_) => {
                store.push_notice(Notice::new("Remote store is empty", NoticeKind::Info));
            }
            Err(e) => {
                store.push_notice(Notice::new(
                    format!("Could not pull projects: {}", e),
                    NoticeKind::Error,
                ));
            }
        },
        RemoteAction::Status => unreachable!("handled above"),
    }
    Ok(())
}
