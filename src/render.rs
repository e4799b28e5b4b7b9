//! Backend-neutral rendering
//!
//! Turns a `GameState` into a flat list of draw commands. A rasterizer (the
//! browser canvas in `main.rs`, or anything else) replays them in order.
//! Reading state here never mutates it.

use glam::DVec2;

use crate::consts::SHOP_CARD_CORNER;
use crate::input::Action;
use crate::settings::Settings;
use crate::sim::{Body, Color, GamePhase, GameState, Rect, slot_rect};

pub const BACKGROUND: Color = Color::gray(20);
pub const HIGHLIGHT: Color = Color::rgb(255, 255, 0);
pub const PROMPT: Color = Color::rgb(100, 255, 100);
pub const TEXT: Color = Color::gray(255);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface
    Clear(Color),
    /// Filled circle; `size` is the diameter
    Circle {
        center: DVec2,
        size: f64,
        color: Color,
    },
    Rect {
        rect: Rect,
        corner_radius: f64,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Text centered on `pos`
    Text {
        pos: DVec2,
        text: String,
        size: f64,
        color: Color,
    },
}

impl DrawCmd {
    fn body(body: &impl Body) -> Self {
        let circle = body.display();
        DrawCmd::Circle {
            center: circle.center,
            size: circle.size,
            color: circle.color,
        }
    }

    fn text(pos: DVec2, text: &str, size: f64, color: Color) -> Self {
        DrawCmd::Text {
            pos,
            text: text.to_string(),
            size,
            color,
        }
    }
}

/// Build the frame with default display settings
pub fn draw(state: &GameState) -> Vec<DrawCmd> {
    draw_with_settings(state, &Settings::default())
}

pub fn draw_with_settings(state: &GameState, settings: &Settings) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear(BACKGROUND)];
    match state.phase {
        GamePhase::Start => draw_start_screen(state, settings, &mut cmds),
        GamePhase::Playing => {
            draw_entities(state, &mut cmds);
            if state.paused {
                draw_pause_overlay(state, settings, &mut cmds);
            }
        }
    }
    cmds
}

fn draw_start_screen(state: &GameState, settings: &Settings, cmds: &mut Vec<DrawCmd>) {
    let arena = &state.arena;
    for (i, slot) in state.shop.slots().iter().enumerate() {
        let Some(weapon) = slot else {
            continue;
        };
        let rect = slot_rect(i, arena);
        let hovered = state.pointer.is_some_and(|p| rect.contains(p));
        let selected = state.shop.selected == Some(i);

        let (fill, stroke) = if hovered || selected {
            (
                Color::gray(50),
                Stroke {
                    color: HIGHLIGHT,
                    width: if hovered { 4.0 } else { 3.0 },
                },
            )
        } else {
            (
                Color::gray(30),
                Stroke {
                    color: Color::gray(100),
                    width: 1.0,
                },
            )
        };
        cmds.push(DrawCmd::Rect {
            rect,
            corner_radius: SHOP_CARD_CORNER,
            fill,
            stroke: Some(stroke),
        });

        let cx = rect.x + rect.w / 2.0;
        cmds.push(DrawCmd::text(DVec2::new(cx, rect.y + 40.0), &weapon.name, 16.0, TEXT));
        cmds.push(DrawCmd::text(
            DVec2::new(cx, rect.y + 70.0),
            weapon.kind.blurb(),
            12.0,
            TEXT,
        ));
        cmds.push(DrawCmd::text(DVec2::new(cx, rect.y + 110.0), "Free", 12.0, TEXT));
    }

    let center = arena.center();
    let grid_top = slot_rect(0, arena).y;
    cmds.push(DrawCmd::text(
        DVec2::new(center.x, grid_top - 40.0),
        "Choose a Weapon",
        24.0,
        TEXT,
    ));

    if !state.player.inventory.is_empty() {
        let key = key_label(settings, Action::Confirm, "ENTER");
        cmds.push(DrawCmd::text(
            DVec2::new(center.x, arena.height - 50.0),
            &format!("Press {key} to Start"),
            24.0,
            PROMPT,
        ));
    }
}

fn draw_entities(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::body(&state.player));
    cmds.extend(state.projectiles.iter().map(DrawCmd::body));
    cmds.extend(state.enemies.iter().map(DrawCmd::body));
}

fn draw_pause_overlay(state: &GameState, settings: &Settings, cmds: &mut Vec<DrawCmd>) {
    let arena = &state.arena;
    cmds.push(DrawCmd::Rect {
        rect: Rect {
            x: 0.0,
            y: 0.0,
            w: arena.width,
            h: arena.height,
        },
        corner_radius: 0.0,
        fill: Color::rgba(0, 0, 0, settings.pause_overlay_alpha),
        stroke: None,
    });
    let center = arena.center();
    cmds.push(DrawCmd::text(center, "PAUSED", 48.0, TEXT));
    let key = key_label(settings, Action::Pause, "ESC");
    cmds.push(DrawCmd::text(
        center + DVec2::new(0.0, 50.0),
        &format!("Press {key} to Resume"),
        20.0,
        TEXT,
    ));
}

/// Prompt key name, following the player's bindings
fn key_label(settings: &Settings, action: Action, fallback: &str) -> String {
    settings
        .bindings
        .label_for(action)
        .unwrap_or_else(|| fallback.to_string())
}
