use std::rc::Rc;

use gpui::{
    ClickEvent, InteractiveElement, IntoElement, ParentElement, Refineable, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, rgb,
};

use crate::id::ComponentId;

type PressHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

const BUTTON_BG: u32 = 0x1d4ed8;
const BUTTON_BG_DISABLED: u32 = 0x93a3b8;

#[derive(IntoElement)]
pub struct Button {
    id: ComponentId,
    label: SharedString,
    disabled: bool,
    style: gpui::StyleRefinement,
    on_click: Option<PressHandler>,
}

impl Button {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("button"),
            label: label.into(),
            disabled: false,
            style: gpui::StyleRefinement::default(),
            on_click: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        let mut root = div()
            .id(self.id.clone())
            .flex()
            .flex_row()
            .items_center()
            .justify_center()
            .px_4()
            .py_1()
            .rounded_md()
            .text_color(gpui::white());

        if self.disabled {
            root = root.bg(rgb(BUTTON_BG_DISABLED)).cursor_default();
        } else {
            root = root.bg(rgb(BUTTON_BG)).cursor_pointer();
            if let Some(handler) = self.on_click {
                root = root.on_click(move |event, window, cx| handler(event, window, cx));
            }
        }

        root.style().refine(&self.style);
        root.child(self.label)
    }
}

impl Styled for Button {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}

crate::impl_disableable!(Button);
