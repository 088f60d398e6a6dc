use super::{performance_now, prefers_reduced_motion, viewport_size, AnimationFrameLoop, WindowListener};
use crate::{
    chase::{drive, CatRole, ChaseScene, ChaseTuning, SceneEvent, SceneFrame, SceneStatus},
    motion::{sprite_style, FloatingIcon, FLOATING_ICONS},
    pursuit::{Point, HOME_POSITION},
    telemetry::{log_event, LogLevel},
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

const BUG_SIZE_PX: f64 = 24.0;
const CAT_SIZE_PX: f64 = 32.0;

#[derive(Properties, PartialEq)]
pub struct CreatureLayerProps {
    pub tuning: ChaseTuning,
}

fn log_scene_events(report: &SceneFrame) {
    for event in &report.events {
        match event {
            SceneEvent::BugAppeared => {
                log_event(LogLevel::Debug, "bug_appeared", serde_json::json!({}));
            }
            SceneEvent::Pounced => {
                log_event(
                    LogLevel::Info,
                    "cat_pounce",
                    serde_json::json!({ "cat_role": report.status.cat_role.as_str() }),
                );
                log_event(LogLevel::Info, "bug_retreat_started", serde_json::json!({}));
            }
            SceneEvent::BugReturned => {
                log_event(
                    LogLevel::Debug,
                    "bug_back_in_play",
                    serde_json::json!({ "cat_role": report.status.cat_role.as_str() }),
                );
            }
        }
    }
}

fn bug_sprite(position: Point, retreating: bool) -> Html {
    html! {
        <div
            class={classes!("cursor-bug", retreating.then_some("is-retreating"))}
            style={sprite_style(position, BUG_SIZE_PX)}
            aria-hidden="true"
        >
            <div class="bug-body-wrap">
                <span class="bug-wing wing-left"></span>
                <span class="bug-wing wing-right"></span>
                <div class="bug-body">
                    <span class="bug-eye eye-left"></span>
                    <span class="bug-eye eye-right"></span>
                    <span class="bug-stripe stripe-top"></span>
                    <span class="bug-stripe stripe-bottom"></span>
                </div>
                <span class="bug-antenna antenna-left"></span>
                <span class="bug-antenna antenna-right"></span>
                <span class="bug-shadow"></span>
            </div>
            <span class="bug-sparkle"></span>
        </div>
    }
}

fn floating_icon(
    icon: FloatingIcon,
    role: CatRole,
    cat_position: Option<Point>,
    on_cat_click: &Callback<MouseEvent>,
) -> Html {
    if !icon.is_cat {
        return html! {
            <div class={classes!("floating-icon", icon.tone)} style={icon.resting_style()} aria-hidden="true">
                <span>{icon.glyph}</span>
            </div>
        };
    }

    let style = match (role, cat_position) {
        (CatRole::Resting, _) | (_, None) => icon.resting_style(),
        (_, Some(position)) => sprite_style(position, CAT_SIZE_PX),
    };
    let role_class = match role {
        CatRole::Resting => None,
        CatRole::Hunting { .. } => Some("is-hunting"),
        CatRole::Prowling => Some("is-prowling"),
    };

    html! {
        <button
            type="button"
            class={classes!("floating-icon", "cat-icon", icon.tone, role_class)}
            style={style}
            aria-label="Send the cat after the bug"
            onclick={on_cat_click.clone()}
        >
            <span aria-hidden="true">{icon.glyph}</span>
            <span class="cat-alert" aria-hidden="true"></span>
        </button>
    }
}

#[function_component(CreatureLayer)]
pub fn creature_layer(props: &CreatureLayerProps) -> Html {
    let scene = use_mut_ref({
        let tuning = props.tuning;
        move || ChaseScene::new(tuning)
    });
    let bug_position = use_state_eq(|| HOME_POSITION);
    let cat_position = use_state_eq(|| None::<Point>);
    let status = use_state_eq(SceneStatus::default);

    {
        let scene = scene.clone();
        let bug_position = bug_position.clone();
        let cat_position = cat_position.clone();
        let status = status.clone();
        use_effect_with((), move |_| {
            let mut frames = AnimationFrameLoop::default();
            let mut listeners = Vec::new();

            if !prefers_reduced_motion() {
                {
                    let mut scene = scene.borrow_mut();
                    let (width, height) = viewport_size();
                    scene.set_viewport(width, height);
                    scene
                        .bug_mut()
                        .attach_observer(move |position| bug_position.set(position));
                    scene
                        .cat_mut()
                        .attach_observer(move |position| cat_position.set(Some(position)));
                    scene.bug_mut().on_retreat_complete(|| {
                        log_event(LogLevel::Info, "bug_retreat_complete", serde_json::json!({}));
                    });
                }

                listeners.extend(WindowListener::new("mousemove", {
                    let scene = scene.clone();
                    move |event| {
                        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                            let pointer =
                                Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                            scene.borrow_mut().pointer_moved(pointer, performance_now());
                        }
                    }
                }));
                listeners.extend(WindowListener::new("resize", {
                    let scene = scene.clone();
                    move |_| {
                        let (width, height) = viewport_size();
                        scene.borrow_mut().set_viewport(width, height);
                    }
                }));

                drive(scene.clone(), &mut frames, move |report| {
                    log_scene_events(&report);
                    status.set(report.status);
                });

                let tuning = *scene.borrow().bug().tuning();
                log_event(
                    LogLevel::Info,
                    "scene_started",
                    serde_json::json!({
                        "min_distance": tuning.min_distance,
                        "max_distance": tuning.max_distance,
                        "lerp_factor": tuning.lerp_factor,
                    }),
                );
            }

            move || {
                drop(frames);
                drop(listeners);
                log_event(LogLevel::Debug, "scene_stopped", serde_json::json!({}));
            }
        });
    }

    let on_cat_click = {
        let scene = scene.clone();
        let cat_position = cat_position.clone();
        Callback::from(move |_: MouseEvent| {
            let now_ms = performance_now();
            if !scene.borrow_mut().cat_clicked(now_ms) {
                return;
            }

            let start = scene.borrow().cat().current();
            cat_position.set(Some(start));
            log_event(
                LogLevel::Info,
                "cat_hunt_started",
                serde_json::json!({ "x": start.x, "y": start.y }),
            );
        })
    };

    html! {
        <div class="creature-layer">
            if status.bug_visible {
                {bug_sprite(*bug_position, status.bug_retreating)}
            }
            <div class="floating-icons">
                { for FLOATING_ICONS
                    .iter()
                    .map(|&icon| floating_icon(icon, status.cat_role, *cat_position, &on_cat_click)) }
            </div>
        </div>
    }
}
