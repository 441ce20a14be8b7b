use gpui::{AnyElement, IntoElement, ParentElement, Refineable, RenderOnce, Styled, Window, div};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StackDirection {
    Vertical,
    Horizontal,
}

/// Flex container used to lay out field rows and columns. Spacing and other
/// refinements come through the [`Styled`] surface.
#[derive(IntoElement)]
pub struct Stack {
    direction: StackDirection,
    style: gpui::StyleRefinement,
    children: Vec<AnyElement>,
}

impl Stack {
    pub fn vertical() -> Self {
        Self {
            direction: StackDirection::Vertical,
            style: gpui::StyleRefinement::default(),
            children: Vec::new(),
        }
    }

    pub fn horizontal() -> Self {
        Self {
            direction: StackDirection::Horizontal,
            style: gpui::StyleRefinement::default(),
            children: Vec::new(),
        }
    }
}

impl Styled for Stack {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}

impl ParentElement for Stack {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Stack {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        let mut root = match self.direction {
            StackDirection::Vertical => div().flex().flex_col(),
            StackDirection::Horizontal => div().flex().flex_row().items_center(),
        };
        root.style().refine(&self.style);
        root.children(self.children)
    }
}
