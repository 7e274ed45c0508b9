//! Canvas-2D presentation and DOM overlays
//!
//! Everything here is derived from `(GameState, facing, Backdrop, time)`
//! each frame; no state flows back into the simulation. Overlay panels are
//! plain DOM nodes the crate creates at startup and toggles per frame.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use crate::consts::*;
use crate::genai::Backdrop;
use crate::sim::{
    DROP_ZONE, GamePhase, GameState, PICKUP_ZONE, QuestGoal, QuestStep, WALLS, Zone,
};

const TAU: f64 = std::f64::consts::TAU;

/// Flat court color used until (or instead of) the generated backdrop
const FALLBACK_FLOOR: &str = "#0f172a";

/// Owns the canvas and its 2D context
pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Find or create the game canvas and grab its 2D context
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = match document.get_element_by_id("game-canvas") {
            Some(el) => el.dyn_into()?,
            None => {
                let el: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                el.set_id("game-canvas");
                el.set_attribute(
                    "style",
                    "display:block; margin:24px auto; border-radius:18px; \
                     box-shadow:0 8px 40px rgba(0,0,0,0.6); background:#0f172a;",
                )?;
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no document body"))?
                    .append_child(&el)?;
                el
            }
        };
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { canvas, ctx })
    }

    /// Draw one frame. `time` is the rAF timestamp, used only for the small
    /// idle/walk animation phases.
    pub fn render(
        &self,
        state: &GameState,
        facing_left: bool,
        backdrop: &Backdrop,
        time: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        match backdrop {
            Backdrop::Ready(img) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)?;
            }
            Backdrop::Pending | Backdrop::Absent => {
                ctx.set_fill_style_str(FALLBACK_FLOOR);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
        }

        self.draw_walls();

        let active_goal = state.quest.active_goal();
        let pickup_active = state.quest.step == QuestStep::Pickup;
        self.draw_zone(&PICKUP_ZONE, "#fbbf24", pickup_active, false, time)?;
        let drop_color = active_goal.map(|g| g.color).unwrap_or("#f87171");
        self.draw_zone(&DROP_ZONE, drop_color, !pickup_active, true, time)?;

        if pickup_active {
            self.draw_rack_ball(time)?;
        }

        self.draw_player(state, facing_left, time)?;
        Ok(())
    }

    /// Courtside furniture, faint so the generated backdrop reads through
    fn draw_walls(&self) {
        let ctx = &self.ctx;
        for wall in WALLS {
            ctx.set_fill_style_str("rgba(148,163,184,0.22)");
            ctx.fill_rect(wall.x as f64, wall.y as f64, wall.w as f64, wall.h as f64);
            ctx.set_stroke_style_str("rgba(148,163,184,0.45)");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(wall.x as f64, wall.y as f64, wall.w as f64, wall.h as f64);
        }
    }

    fn draw_zone(
        &self,
        zone: &Zone,
        color: &str,
        active: bool,
        hoop: bool,
        time: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y) = (zone.pos.x as f64, zone.pos.y as f64);
        ctx.save();
        ctx.set_global_alpha(if active { 1.0 } else { 0.3 });

        let pulse = 1.0 + (time / 250.0).sin() * 0.1;
        ctx.begin_path();
        ctx.ellipse(x, y, 40.0 * pulse, 20.0 * pulse, 0.0, 0.0, TAU)?;
        if active {
            ctx.set_fill_style_str(&format!("{color}33"));
        } else {
            ctx.set_fill_style_str("rgba(255,255,255,0.07)");
        }
        ctx.fill();
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(3.0);
        ctx.stroke();

        // Marker: a rim for the hoop, a rack bar for the pickup
        if hoop {
            ctx.begin_path();
            ctx.arc(x, y, 9.0, 0.0, TAU)?;
            ctx.set_stroke_style_str("#ffffff");
            ctx.set_line_width(3.0);
            ctx.stroke();
        } else {
            ctx.set_fill_style_str("#cbd5e1");
            ctx.fill_rect(x - 12.0, y - 3.0, 24.0, 6.0);
        }

        ctx.set_font("bold 16px sans-serif");
        ctx.set_text_align("center");
        let width = ctx.measure_text(zone.label)?.width();
        ctx.set_fill_style_str("rgba(0,0,0,0.85)");
        ctx.fill_rect(x - width / 2.0 - 8.0, y + 25.0, width + 16.0, 24.0);
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_text(zone.label, x, y + 42.0)?;
        ctx.restore();
        Ok(())
    }

    /// The waiting ball hovering over the rack
    fn draw_rack_ball(&self, time: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let hover = (time / 300.0).sin() * 5.0;
        let (x, y) = (PICKUP_ZONE.pos.x as f64, PICKUP_ZONE.pos.y as f64);
        ctx.save();
        ctx.set_fill_style_str("#f97316");
        ctx.begin_path();
        ctx.arc(x, y - 15.0 + hover, 12.0, 0.0, TAU)?;
        ctx.fill();
        ctx.set_stroke_style_str("#000000");
        ctx.set_line_width(1.0);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn draw_player(
        &self,
        state: &GameState,
        facing_left: bool,
        time: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let player = &state.player;
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let size = player.size as f64;
        let step = if state.moving {
            (time / 100.0).sin() * 5.0
        } else {
            0.0
        };
        let bob = (time / 400.0).sin() * 2.0;

        ctx.set_fill_style_str("rgba(0,0,0,0.3)");
        ctx.begin_path();
        ctx.ellipse(x + size / 2.0, y + size - 2.0, 16.0, 6.0, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.save();
        if facing_left {
            // Mirror the sprite around its own vertical center line
            ctx.translate(x + size, y)?;
            ctx.scale(-1.0, 1.0)?;
            ctx.translate(-x, -y)?;
        }
        // Legs, alternating with the walk phase
        ctx.set_fill_style_str("#1e3a8a");
        ctx.fill_rect(x + 6.0, y + 20.0 + step, 8.0, 10.0);
        ctx.fill_rect(x + 18.0, y + 20.0 - step, 8.0, 10.0);
        // Jersey
        ctx.set_fill_style_str("#fbbf24");
        ctx.fill_rect(x + 4.0, y + 8.0 + bob, 24.0, 16.0);
        ctx.set_fill_style_str("#1d4ed8");
        ctx.fill_rect(x + 12.0, y + 12.0 + bob, 8.0, 8.0);
        // Head and hair
        ctx.set_fill_style_str("#ffdbac");
        ctx.fill_rect(x + 10.0, y + bob - 8.0, 12.0, 12.0);
        ctx.set_fill_style_str("#4b2c20");
        ctx.fill_rect(x + 10.0, y + bob - 8.0, 12.0, 4.0);
        ctx.restore();

        if player.held_goal.is_some() {
            let dribble = (time / 150.0).sin() * 10.0;
            let ball_x = if facing_left { x - 5.0 } else { x + size + 5.0 };
            let ball_y = y + 15.0 + dribble;
            ctx.set_fill_style_str("#f97316");
            ctx.begin_path();
            ctx.arc(ball_x, ball_y, 10.0, 0.0, TAU)?;
            ctx.fill();
            ctx.set_stroke_style_str("#000000");
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
        Ok(())
    }
}

// --- DOM overlays ------------------------------------------------------------

const CARD_STYLE: &str = "display:none; position:fixed; inset:0; z-index:40; \
    align-items:center; justify-content:center; background:rgba(2,6,23,0.92); \
    color:#e2e8f0; font-family:sans-serif; text-align:center;";

const BANNER_STYLE: &str = "display:none; position:fixed; top:16px; left:50%; \
    transform:translateX(-50%); z-index:30; background:rgba(0,0,0,0.8); \
    color:#ffffff; font-family:sans-serif; padding:10px 28px; \
    border:2px solid rgba(249,115,22,0.5); border-radius:14px; text-align:center;";

const LOADING_STYLE: &str = "display:none; position:fixed; bottom:24px; left:50%; \
    transform:translateX(-50%); z-index:30; background:rgba(0,0,0,0.7); \
    color:#fdba74; font-family:sans-serif; padding:8px 20px; border-radius:10px;";

const TITLE_HTML: &str = "<div style='max-width:560px; padding:40px; \
    border:2px solid rgba(251,191,36,0.5); border-radius:22px; background:#020617;'>\
    <h2 style='font-size:2em; color:#ffffff;'>Victory Is a Team Goal</h2>\
    <p style='font-size:1.1em; line-height:1.5;'>Welcome to the court. Carry each \
    winning play from the ball rack to the hoop to reveal the full game plan.</p>\
    <p style='color:#fbbf24; font-weight:bold;'>Press the arrows or Enter to take the floor</p>\
    </div>";

const COMPLETE_HTML: &str = "<div style='max-width:560px; padding:40px; \
    border:2px solid rgba(16,185,129,0.5); border-radius:22px; background:#020617;'>\
    <h2 style='font-size:2em; color:#ffffff;'>Clean Sweep!</h2>\
    <p style='font-size:1.1em; line-height:1.5;'>Every play delivered. The full game \
    plan is on the board and the team is ready to win.</p>\
    <p style='color:#34d399; font-weight:bold;'>Press the arrows or Enter for a rematch</p>\
    </div>";

/// Create the overlay panels once (all hidden). Idempotent.
pub fn install_overlays(document: &Document) -> Result<(), JsValue> {
    ensure_div(document, "mission-banner", BANNER_STYLE, "")?;
    ensure_div(
        document,
        "backdrop-loading",
        LOADING_STYLE,
        "Painting the court&hellip;",
    )?;
    ensure_div(document, "title-overlay", CARD_STYLE, TITLE_HTML)?;
    ensure_div(document, "complete-overlay", CARD_STYLE, COMPLETE_HTML)?;
    ensure_div(document, "goal-modal", CARD_STYLE, "")?;
    Ok(())
}

/// Show/hide the overlays to match the current phase and fill the dynamic
/// panels. Content writes are guarded by a data attribute so the per-frame
/// call does not rebuild DOM.
pub fn sync_overlays(document: &Document, state: &GameState, backdrop: &Backdrop) {
    set_visible(document, "title-overlay", state.phase == GamePhase::Title, "flex");
    set_visible(
        document,
        "complete-overlay",
        state.phase == GamePhase::Completed,
        "flex",
    );
    set_visible(
        document,
        "backdrop-loading",
        matches!(backdrop, Backdrop::Pending),
        "block",
    );

    let banner_on = state.phase == GamePhase::Playing;
    if banner_on {
        update_banner(document, state);
    }
    set_visible(document, "mission-banner", banner_on, "block");

    let modal_on = state.phase == GamePhase::GoalInfo;
    if modal_on {
        if let Some(goal) = state.quest.active_goal() {
            update_goal_modal(document, goal);
        }
    }
    set_visible(document, "goal-modal", modal_on, "flex");
}

fn set_visible(document: &Document, id: &str, on: bool, display: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let _ = el
                .style()
                .set_property("display", if on { display } else { "none" });
        }
    }
}

fn update_banner(document: &Document, state: &GameState) {
    let Some(goal) = state.quest.active_goal() else {
        return;
    };
    let Some(el) = document.get_element_by_id("mission-banner") else {
        return;
    };
    let key = format!("{}-{:?}", goal.id, state.quest.step);
    if el.get_attribute("data-key").as_deref() == Some(key.as_str()) {
        return;
    }
    let prompt = match state.quest.step {
        QuestStep::Pickup => format!("Grab the ball: {}", goal.label),
        QuestStep::Deliver => "Run to the hoop and score!".to_string(),
    };
    el.set_inner_html(&format!(
        "<div style='font-size:0.7em; letter-spacing:2px; color:#94a3b8;'>CURRENT MISSION</div>\
         <div style='font-size:1.2em; font-weight:900;'>{prompt}</div>"
    ));
    let _ = el.set_attribute("data-key", &key);
}

fn update_goal_modal(document: &Document, goal: &QuestGoal) {
    let Some(el) = document.get_element_by_id("goal-modal") else {
        return;
    };
    let key = goal.id.to_string();
    if el.get_attribute("data-goal").as_deref() == Some(key.as_str()) {
        return;
    }
    let examples: String = goal
        .examples
        .iter()
        .map(|ex| {
            format!(
                "<li style='background:#0f172a; border:1px solid #1e293b; \
                 border-radius:8px; padding:8px 12px; margin:4px 0;'>{ex}</li>"
            )
        })
        .collect();
    el.set_inner_html(&format!(
        "<div style='max-width:640px; padding:32px; text-align:left; background:#020617; \
         border:2px solid {color}; border-radius:18px;'>\
         <div style='color:{color}; font-size:0.8em; letter-spacing:2px;'>BUCKET SCORED</div>\
         <h2 style='color:#ffffff; margin:4px 0 16px;'><i class='fa-solid {icon}'></i> {title}</h2>\
         <p style='line-height:1.55;'>{description}</p>\
         <ul style='list-style:none; padding:0;'>{examples}</ul>\
         <p style='color:#34d399; font-style:italic;'>{payoff}</p>\
         <p style='color:#64748b; font-size:0.8em;'>Press an arrow key, Enter or Escape to continue</p>\
         </div>",
        color = goal.color,
        icon = goal.icon,
        title = goal.title,
        description = goal.description,
        payoff = goal.payoff,
    ));
    let _ = el.set_attribute("data-goal", &key);
}

fn ensure_div(
    document: &Document,
    id: &str,
    style: &str,
    html: &str,
) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document.create_element("div")?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    el.set_inner_html(html);
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?
        .append_child(&el)?;
    Ok(el)
}
