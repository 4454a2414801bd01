use clap::Parser;
use log::{error, info, warn};
use piston_window::*;

use rps_swarm::error::AppResult;
use rps_swarm::render::PistonCanvas;
use rps_swarm::{AgentType, AppError, Args, STATS_AREA_HEIGHT, SimConfig, Simulation};

const STATS_BACKGROUND: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const STATS_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const STATS_FONT_SIZE: u32 = 14;

enum UserAction {
    Start,
    Add(AgentType),
}

fn action_for(button: Button) -> Option<UserAction> {
    match button {
        Button::Keyboard(Key::S | Key::Return) | Button::Mouse(MouseButton::Left) => {
            Some(UserAction::Start)
        }
        Button::Keyboard(Key::D1 | Key::R) => Some(UserAction::Add(AgentType::Rock)),
        Button::Keyboard(Key::D2 | Key::C) => Some(UserAction::Add(AgentType::Scissors)),
        Button::Keyboard(Key::D3 | Key::P) => Some(UserAction::Add(AgentType::Paper)),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        error!("{err}");
        eprintln!("rps-swarm: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> AppResult<()> {
    let config = SimConfig::from(&args);
    let mut sim = Simulation::new(config)?;
    let config = sim.config().clone();
    info!(
        "field {}x{}, {} agents, seed {}",
        config.width,
        config.height,
        config.initial_count,
        sim.seed()
    );

    let mut window: PistonWindow = WindowSettings::new(
        "Rock Scissors Paper",
        [config.width as u32, (config.height + STATS_AREA_HEIGHT) as u32],
    )
    .exit_on_esc(true)
    .build()
    .map_err(|e| AppError::Window(e.to_string()))?;

    let mut glyphs = if args.font.exists() {
        match window.load_font(&args.font) {
            Ok(glyphs) => Some(glyphs),
            Err(err) => {
                warn!("could not load font {:?}: {err}", args.font);
                None
            }
        }
    } else {
        warn!("font file {:?} not found, labels disabled", args.font);
        None
    };

    while let Some(e) = window.next() {
        if let Some(button) = e.press_args() {
            match action_for(button) {
                Some(UserAction::Start) => sim.start(),
                Some(UserAction::Add(kind)) => sim.add_agent(kind),
                None => {}
            }
        }

        if e.render_args().is_none() {
            continue;
        }

        window.draw_2d(&e, |c, g, device| {
            clear([0.1, 0.1, 0.1, 1.0], g);

            rectangle(
                STATS_BACKGROUND,
                [0.0, 0.0, config.width, STATS_AREA_HEIGHT],
                c.transform,
                g,
            );
            if let Some(ref mut glyphs) = glyphs {
                let status = sim.status_line();
                if let Err(err) = text::Text::new_color(STATS_TEXT, STATS_FONT_SIZE).draw(
                    &status,
                    glyphs,
                    &c.draw_state,
                    c.transform.trans(10.0, 30.0),
                    g,
                ) {
                    log::trace!("stats bar not drawn: {err:?}");
                }
            }

            let field = c.transform.trans(0.0, STATS_AREA_HEIGHT);
            {
                let mut canvas = PistonCanvas::new(field, c.draw_state, g, glyphs.as_mut());
                if sim.is_running() {
                    sim.tick(&mut canvas);
                } else {
                    sim.render(&mut canvas);
                }
            }

            if let Some(ref mut glyphs) = glyphs {
                glyphs.factory.encoder.flush(device);
            }
        });
    }

    Ok(())
}
