//! SVG scene writer
//!
//! Keeps one DOM element per scene primitive and patches attributes each
//! frame. Elements are keyed (launcher, alien name, firework id) so an
//! element is created once and removed when its primitive disappears.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::scene::{Line, Rect, Scene};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Owns the `<svg>` element's children
pub struct SvgSurface {
    document: Document,
    root: Element,
    launcher: Element,
    aliens: HashMap<String, Element>,
    fireworks: HashMap<u32, Element>,
}

impl SvgSurface {
    /// Take over `root`, creating the launcher element
    pub fn new(document: Document, root: Element) -> Result<Self, JsValue> {
        let launcher = document.create_element_ns(Some(SVG_NS), "rect")?;
        root.append_child(&launcher)?;
        Ok(Self {
            document,
            root,
            launcher,
            aliens: HashMap::new(),
            fireworks: HashMap::new(),
        })
    }

    /// Bring the DOM in line with `scene`
    pub fn draw(&mut self, scene: &Scene) -> Result<(), JsValue> {
        write_rect(&self.launcher, &scene.launcher)?;

        for rect in &scene.aliens {
            let el = match self.aliens.get(&rect.key) {
                Some(el) => el.clone(),
                None => {
                    let el = self.document.create_element_ns(Some(SVG_NS), "rect")?;
                    self.root.append_child(&el)?;
                    self.aliens.insert(rect.key.clone(), el.clone());
                    el
                }
            };
            write_rect(&el, rect)?;
        }

        for line in &scene.fireworks {
            let el = match self.fireworks.get(&line.key) {
                Some(el) => el.clone(),
                None => {
                    let el = self.document.create_element_ns(Some(SVG_NS), "line")?;
                    // Fireworks sit beneath the launcher
                    let first = self.root.first_child();
                    self.root.insert_before(&el, first.as_ref())?;
                    self.fireworks.insert(line.key, el.clone());
                    el
                }
            };
            write_line(&el, line)?;
        }

        // Retire fireworks that finished their flight
        let live: Vec<u32> = scene.fireworks.iter().map(|l| l.key).collect();
        self.fireworks.retain(|id, el| {
            let keep = live.contains(id);
            if !keep {
                el.remove();
            }
            keep
        });

        Ok(())
    }

    /// Remove every element this surface created
    pub fn clear(&mut self) {
        self.launcher.remove();
        for (_, el) in self.aliens.drain() {
            el.remove();
        }
        for (_, el) in self.fireworks.drain() {
            el.remove();
        }
    }

    /// Number of firework elements currently in the DOM
    pub fn firework_count(&self) -> usize {
        self.fireworks.len()
    }
}

fn write_rect(el: &Element, rect: &Rect) -> Result<(), JsValue> {
    el.set_attribute("class", rect.class)?;
    el.set_attribute("x", &rect.x.to_string())?;
    el.set_attribute("y", &rect.y.to_string())?;
    el.set_attribute("width", &rect.width.to_string())?;
    el.set_attribute("height", &rect.height.to_string())?;
    el.set_attribute("fill", rect.fill)?;
    Ok(())
}

fn write_line(el: &Element, line: &Line) -> Result<(), JsValue> {
    el.set_attribute("class", line.class)?;
    el.set_attribute("x1", &line.x1.to_string())?;
    el.set_attribute("y1", &line.y1.to_string())?;
    el.set_attribute("x2", &line.x2.to_string())?;
    el.set_attribute("y2", &line.y2.to_string())?;
    el.set_attribute("stroke", line.stroke)?;
    Ok(())
}
