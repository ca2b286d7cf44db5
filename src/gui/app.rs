use crate::config::{self, Config, Overrides};
use crate::events::AppEvent;
use crate::gui::geometry::Size;
use crate::gui::ring::{self, RingState};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<RingState>>,
    pub overrides: Overrides,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    TextChanged(String),
    TogglePause,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Overrides, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Gyre"),
            set_default_size: (480, 720),

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                gtk::Label {
                    set_label: "Enter text",
                    set_halign: gtk::Align::Start,
                    add_css_class: "gyre-input",
                },

                #[name = "entry"]
                gtk::Entry {
                    add_css_class: "gyre-input",
                    set_text: &initial_text,
                    connect_changed[sender] => move |entry| {
                        sender.input(AppMsg::TextChanged(entry.text().to_string()));
                    },
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "gyre-canvas",

                    // click the ring to freeze or resume it
                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::TogglePause);
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, overrides, rx) = init;

        theme::load_css();

        let initial_text = config.text.clone();
        let state = RingState::from_config(&config, &ThemeColors::default());

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            overrides,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let colors = ThemeColors::from_context(&widgets.drawing_area.style_context());
        model.state.borrow_mut().apply_config(&config, &colors);

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let size = Size::new(width as f64, height as f64);
                if let Err(e) = ring::draw(cr, &state_draw.borrow(), size) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let state_tick = model.state.clone();
        widgets.drawing_area.add_tick_callback(move |area, clock| {
            if state_tick.borrow_mut().tick(clock.frame_time()) {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::TextChanged(text) => {
                if self.state.borrow_mut().set_text(text) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::TogglePause => {
                let mut state = self.state.borrow_mut();
                state.toggle_pause();
                log::debug!("Animation paused: {}", state.paused);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(mut new_config) => {
                    self.overrides.apply(&mut new_config);
                    let colors = ThemeColors::from_context(&self.drawing_area.style_context());
                    self.state.borrow_mut().apply_config(&new_config, &colors);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
