//! Canvas 2D renderer

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::{ChickenSprite, Renderer, Snapshot};
use crate::assets::{AssetStore, names};
use crate::sim::GamePhase;

const BACKGROUND: &str = "#FAFAFA";
const TEXT: &str = "#333333";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: AssetStore<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, images: AssetStore<HtmlImageElement>) -> Self {
        Self { ctx, images }
    }

    /// Draw `name` centered at (x, y), optionally mirrored horizontally
    fn sprite(
        &self,
        name: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        flipped: bool,
    ) -> Result<(), JsValue> {
        let img = self.images.get(name);
        self.ctx.save();
        self.ctx.translate(x, y)?;
        if flipped {
            self.ctx.scale(-1.0, 1.0)?;
        }
        let result = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
        result
    }

    fn chicken(&self, c: &ChickenSprite, w: f64, h: f64) -> Result<(), JsValue> {
        self.sprite(c.image, c.x as f64, (c.y - c.lift) as f64, w, h, c.flipped)
    }

    fn centered_text(&self, text: &str, x: f64, y: f64, px: u32) -> Result<(), JsValue> {
        self.ctx.set_font(&format!("{}px sans-serif", px));
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(TEXT);
        self.ctx.fill_text(text, x, y)
    }

    fn hud(&self, snapshot: &Snapshot) -> Result<(), JsValue> {
        self.ctx.set_font("20px sans-serif");
        self.ctx.set_text_align("left");
        self.ctx.set_fill_style_str(TEXT);
        self.ctx.fill_text(&format!("Score: {}", snapshot.score), 16.0, 32.0)?;
        self.ctx
            .fill_text(&format!("Chickens: {}", snapshot.population), 16.0, 58.0)
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(&mut self, snapshot: &Snapshot) -> Result<(), JsValue> {
        let (width, height) = (snapshot.width as f64, snapshot.height as f64);
        let (sw, sh) = (snapshot.sprite_width as f64, snapshot.sprite_height as f64);

        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width, height);

        match snapshot.phase {
            GamePhase::Loading => {
                self.centered_text("Loading...", width / 2.0, height / 2.0, 24)?;
            }
            GamePhase::WelcomeScreen => {
                if let Some(m) = &snapshot.mascot {
                    let scale = m.scale as f64;
                    self.sprite(
                        names::MASCOT,
                        m.x as f64,
                        (m.y - m.lift) as f64,
                        sw * scale,
                        sh * scale,
                        false,
                    )?;
                }
                self.centered_text("Tap to start", width / 2.0, height * 0.8, 28)?;
            }
            GamePhase::MainGame => {
                for egg in &snapshot.eggs {
                    self.sprite(egg.image, egg.x as f64, egg.y as f64, sw / 2.0, sh / 2.0, false)?;
                }
                for chicken in &snapshot.chickens {
                    self.chicken(chicken, sw, sh)?;
                }
                self.hud(snapshot)?;
            }
            GamePhase::GameOver => {
                self.centered_text("Game over", width / 2.0, height / 2.0, 32)?;
            }
        }
        Ok(())
    }
}
