use crate::config::{self, ThemeName};
use crate::events::AppEvent;
use crate::gui::dial;
use crate::gui::remote::{RemoteState, Swing};
use crate::gui::theme::{self, ThemeColors};
use arcdial::{DialAction, Point};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct AppModel {
    pub remote: Rc<RefCell<RemoteState>>,
    pub theme: Rc<Cell<ThemeName>>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    DragBegin(Point),
    DragUpdate(Point),
    DragEnd,
    DragCancel,
    Resize(i32, i32),
    Increase,
    Decrease,
    Power(bool),
    Swing(Swing),
    SmartSave(bool),
    CycleMode,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn highlight(active: bool) -> &'static [&'static str] {
    if active {
        &["suggested-action"]
    } else {
        &["flat"]
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (RemoteState, ThemeName, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Helium"),
            set_default_width: 360,
            set_default_height: 560,
            #[watch]
            set_css_classes: &["helium-window", model.theme.get().css_class()],

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_top: 24,
                set_margin_bottom: 24,
                set_margin_start: 24,
                set_margin_end: 24,

                gtk::Label {
                    add_css_class: "helium-caption",
                    #[watch]
                    set_label: if model.remote.borrow().smart_save {
                        "Smart save keeps the temperature efficient"
                    } else {
                        "Manual control"
                    },
                },

                gtk::Label {
                    set_label: "HELIUM",
                    add_css_class: "helium-brand",
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: 260,
                    set_content_height: 200,
                    add_css_class: "helium-dial",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::DragBegin(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::DragUpdate(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::DragEnd);
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::DragCancel);
                        },
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 16,
                    set_halign: gtk::Align::Center,

                    gtk::Button {
                        set_label: "−",
                        connect_clicked => AppMsg::Decrease,
                    },
                    gtk::Label {
                        #[watch]
                        set_label: &model.remote.borrow().temperature().to_string(),
                    },
                    gtk::Button {
                        set_label: "+",
                        connect_clicked => AppMsg::Increase,
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_halign: gtk::Align::Center,

                    gtk::Button {
                        set_label: "ON",
                        #[watch]
                        set_css_classes: highlight(model.remote.borrow().powered),
                        connect_clicked => AppMsg::Power(true),
                    },
                    gtk::Button {
                        set_label: "OFF",
                        #[watch]
                        set_css_classes: highlight(!model.remote.borrow().powered),
                        connect_clicked => AppMsg::Power(false),
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_halign: gtk::Align::Center,

                    gtk::Label {
                        set_label: "Smart save",
                    },
                    gtk::Switch {
                        #[watch]
                        set_active: model.remote.borrow().smart_save,
                        connect_state_set[sender] => move |_, enabled| {
                            sender.input(AppMsg::SmartSave(enabled));
                            glib::Propagation::Proceed
                        },
                    },
                },

                gtk::Button {
                    #[watch]
                    set_visible: model.remote.borrow().advanced_controls_visible(),
                    #[watch]
                    set_label: &format!("Mode: {}", model.remote.borrow().mode),
                    connect_clicked => AppMsg::CycleMode,
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_halign: gtk::Align::Center,

                    gtk::Button {
                        set_label: "Horizontal",
                        #[watch]
                        set_css_classes: highlight(model.remote.borrow().swing == Swing::Horizontal),
                        connect_clicked => AppMsg::Swing(Swing::Horizontal),
                    },
                    gtk::Button {
                        set_label: "Vertical",
                        #[watch]
                        set_css_classes: highlight(model.remote.borrow().swing == Swing::Vertical),
                        connect_clicked => AppMsg::Swing(Swing::Vertical),
                    },
                },

                gtk::Label {
                    add_css_class: "helium-caption",
                    #[watch]
                    set_label: &format!("Current: {}", model.remote.borrow().swing),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (remote, theme_name, rx) = init;

        theme::load_css();

        let model = AppModel {
            remote: Rc::new(RefCell::new(remote)),
            theme: Rc::new(Cell::new(theme_name)),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let remote_draw = model.remote.clone();
        let theme_draw = model.theme.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context, theme_draw.get());
                if let Err(e) = dial::draw(cr, &remote_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
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
        let action = {
            let mut remote = self.remote.borrow_mut();
            match msg {
                AppMsg::DragBegin(point) => remote.dial.drag_start(point),
                AppMsg::DragUpdate(point) => remote.dial.drag_move(point),
                AppMsg::DragEnd => remote.dial.drag_end(),
                AppMsg::DragCancel => remote.dial.drag_cancel(),
                AppMsg::Resize(width, height) => remote.resize(width as f64, height as f64),
                AppMsg::Increase => remote.increase(),
                AppMsg::Decrease => remote.decrease(),
                AppMsg::Power(on) => {
                    if remote.set_power(on) {
                        log::info!("Power {}", if on { "on" } else { "off" });
                    }
                    DialAction::redraw()
                }
                AppMsg::Swing(swing) => {
                    remote.toggle_swing(swing);
                    DialAction::default()
                }
                AppMsg::SmartSave(enabled) => {
                    remote.set_smart_save(enabled);
                    DialAction::default()
                }
                AppMsg::CycleMode => {
                    let mode = remote.cycle_mode();
                    log::debug!("Mode set to {}", mode);
                    DialAction::default()
                }
                AppMsg::ConfigReload => match config::load_config() {
                    Ok(new_config) => {
                        self.theme.set(new_config.theme);
                        match remote.apply_config(&new_config) {
                            Ok(action) => {
                                log::info!("Configuration reloaded");
                                action
                            }
                            Err(e) => {
                                log::error!("Failed to apply reloaded config: {}", e);
                                DialAction::redraw()
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to reload config: {}", e);
                        DialAction::default()
                    }
                },
            }
        };

        if action.value_changed {
            log::debug!("Temperature set to {}", self.remote.borrow().temperature());
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }
}
