use color_eyre::{eyre::eyre, Result};
use stickmap::config::{default_config_path, AppConfig};
use stickmap::controller::{ControlStick, Direction, JoyAxis, StickEvent, StickMode};
use stickmap::mapping::keys::name_to_keycode;
use stickmap::mapping::{ActionSlot, DirectionTarget, SlotMode};
use stickmap::persistence::Profile;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Replays stick samples from stdin.
///
/// Each line is either `<x> <y>` or one of the commands `reset`, `save`,
/// `mode standard`, `mode eight-way` and `bind <direction code> <key name>`.
#[tokio::main]
async fn main() -> Result<()> {
    let config = setup().await?;

    let profile_path = config.profile_file();
    let mut profile = Profile::load_or_default(&profile_path).await?;
    let real_index = i32::try_from(config.stick_index + 1)
        .map_err(|e| eyre!("Stick index {} out of range: {}", config.stick_index, e))?;

    let axis_x = JoyAxis::new(config.x_axis);
    let axis_y = JoyAxis::new(config.y_axis);
    let mut stick = ControlStick::new(axis_x.clone(), axis_y.clone(), config.stick_index, 0)
        .with_event_capacity(config.event_capacity);

    if let Some(stick_config) = profile.stick(real_index) {
        stick.read_config(stick_config);
    }
    info!("{}", stick.name());

    let _event_logger = tokio::spawn(log_events(stick.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_direction = stick.current_direction();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [] => continue,
            ["reset"] => {
                stick.reset();
                info!("Stick {} reset", stick.real_index());
            }
            ["save"] => {
                profile.set_stick(real_index, stick.write_config());
                match profile.save(&profile_path).await {
                    Ok(()) => info!("Profile saved to {}", profile_path.display()),
                    Err(e) => error!("{}", e),
                }
            }
            ["mode", name] => match name.parse::<StickMode>() {
                Ok(mode) => {
                    stick.set_mode(mode);
                    info!("Stick {} mode {}", stick.real_index(), mode.as_str());
                }
                Err(e) => warn!("{}", e),
            },
            ["bind", code, key] => match bind_key(&mut stick, code, key) {
                Ok(direction) => info!(
                    "{} -> {}",
                    direction,
                    stick.button(direction).summary_label()
                ),
                Err(e) => warn!("{}", e),
            },
            [x, y] => match (x.parse::<i32>(), y.parse::<i32>()) {
                (Ok(x), Ok(y)) => {
                    axis_x.set_raw_value(x);
                    axis_y.set_raw_value(y);
                    stick.process_sample(false);

                    let direction = stick.current_direction();
                    if direction != last_direction {
                        let held: Vec<String> = stick
                            .activation()
                            .active_directions()
                            .into_iter()
                            .map(|d| format!("{} [{}]", d, stick.button(d).summary_label()))
                            .collect();
                        info!(
                            "{} -> {} (distance {:.3}) holding: {}",
                            last_direction,
                            direction,
                            stick.distance_from_dead_zone(),
                            held.join(", ")
                        );
                        last_direction = direction;
                    }
                }
                _ => warn!("Ignoring malformed sample '{}'", line),
            },
            _ => warn!("Ignoring unknown input '{}'", line),
        }
    }

    stick.release_button_events();
    debug!("Input closed");
    Ok(())
}

fn bind_key(stick: &mut ControlStick, code: &str, key: &str) -> Result<Direction> {
    let code = code
        .parse::<i32>()
        .map_err(|e| eyre!("Invalid direction code '{}': {}", code, e))?;
    let direction = Direction::from_code(code)?;
    let keycode = name_to_keycode(key)?;
    stick
        .button_mut(direction)
        .add_slot(ActionSlot::new(keycode, SlotMode::Keyboard));
    Ok(direction)
}

async fn log_events(mut events: broadcast::Receiver<StickEvent>) {
    loop {
        match events.recv().await {
            Ok(StickEvent::Moved { .. }) => {}
            Ok(event) => debug!("{:?}", event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Event logger skipped {} events", skipped)
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn setup() -> Result<AppConfig> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;

    let config = AppConfig::load_or_default(&default_config_path()).await?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level)
    }
    let level = config.level();
    setup_logging_env(level.unwrap_or(Level::INFO));
    if level.is_none() {
        warn!("Unknown log level '{}', using info", config.log_level);
    }
    Ok(config)
}

fn setup_logging_env(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
