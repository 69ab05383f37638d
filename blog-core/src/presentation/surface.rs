use std::collections::BTreeMap;

/// Элементы страницы, в которые пишут виды.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Anchor {
    BlogGrid,
    BlogLoading,
    BlogEmpty,
    BlogError,
    BlogErrorMessage,
    PostContent,
    PostLoading,
    PostError,
    PostErrorHeading,
    PostErrorMessage,
    PostCategory,
    PostTitle,
    AuthorAvatar,
    AuthorName,
    PostDate,
    PostReadTime,
    PostCover,
    PostBody,
    PostTags,
    ShareTwitter,
    ShareLinkedin,
    ShareFacebook,
}

impl Anchor {
    pub const LISTING: [Anchor; 5] = [
        Anchor::BlogGrid,
        Anchor::BlogLoading,
        Anchor::BlogEmpty,
        Anchor::BlogError,
        Anchor::BlogErrorMessage,
    ];

    pub const DETAIL: [Anchor; 17] = [
        Anchor::PostContent,
        Anchor::PostLoading,
        Anchor::PostError,
        Anchor::PostErrorHeading,
        Anchor::PostErrorMessage,
        Anchor::PostCategory,
        Anchor::PostTitle,
        Anchor::AuthorAvatar,
        Anchor::AuthorName,
        Anchor::PostDate,
        Anchor::PostReadTime,
        Anchor::PostCover,
        Anchor::PostBody,
        Anchor::PostTags,
        Anchor::ShareTwitter,
        Anchor::ShareLinkedin,
        Anchor::ShareFacebook,
    ];

    /// Id элемента, которому принадлежит якорь.
    pub fn element_id(self) -> &'static str {
        match self {
            Anchor::BlogGrid => "blogGrid",
            Anchor::BlogLoading => "blogLoading",
            Anchor::BlogEmpty => "blogEmpty",
            Anchor::BlogError | Anchor::BlogErrorMessage => "blogError",
            Anchor::PostContent => "postContent",
            Anchor::PostLoading => "postLoading",
            Anchor::PostError | Anchor::PostErrorHeading | Anchor::PostErrorMessage => "postError",
            Anchor::PostCategory => "postCategory",
            Anchor::PostTitle => "postTitle",
            Anchor::AuthorAvatar => "authorAvatar",
            Anchor::AuthorName => "authorName",
            Anchor::PostDate => "postDate",
            Anchor::PostReadTime => "postReadTime",
            Anchor::PostCover => "postCover",
            Anchor::PostBody => "postBody",
            Anchor::PostTags => "postTags",
            Anchor::ShareTwitter => "shareTwitter",
            Anchor::ShareLinkedin => "shareLinkedin",
            Anchor::ShareFacebook => "shareFacebook",
        }
    }

    /// CSS-селектор якоря. Слоты сообщений лежат внутри своего региона.
    pub fn selector(self) -> String {
        match self {
            Anchor::BlogErrorMessage | Anchor::PostErrorMessage => {
                format!("#{} p", self.element_id())
            }
            Anchor::PostErrorHeading => format!("#{} h3", self.element_id()),
            _ => format!("#{}", self.element_id()),
        }
    }
}

/// Страница, в которую рисуют виды. Реализации пропускают якоря, которых на странице нет.
pub trait PageSurface {
    fn has_anchor(&self, anchor: Anchor) -> bool;
    fn set_visible(&mut self, anchor: Anchor, visible: bool);
    fn set_text(&mut self, anchor: Anchor, text: &str);
    /// `html` вставляется как разметка, недоверенные части экранирует вызывающий.
    fn set_html(&mut self, anchor: Anchor, html: &str);
    fn set_attribute(&mut self, anchor: Anchor, name: &str, value: &str);
    fn add_class(&mut self, anchor: Anchor, class: &str);
    fn set_document_title(&mut self, title: &str);
    fn set_meta_description(&mut self, description: &str);
}

/// Показывает `visible` и скрывает остальные регионы группы.
pub fn show_exclusive<S: PageSurface + ?Sized>(surface: &mut S, group: &[Anchor], visible: Anchor) {
    for &region in group {
        surface.set_visible(region, region == visible);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub visible: bool,
    pub text: Option<String>,
    pub html: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
}

impl ElementState {
    /// Содержимое элемента: html важнее текста.
    pub fn inner(&self) -> Option<&str> {
        self.html.as_deref().or(self.text.as_deref())
    }
}

/// Страница в памяти: запоминает, что виды сделали с каждым якорем.
///
/// Все якоря изначально скрыты и пусты.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPage {
    elements: BTreeMap<Anchor, ElementState>,
    document_title: Option<String>,
    meta_description: Option<String>,
    mutations: usize,
}

impl StaticPage {
    pub fn with_anchors(anchors: impl IntoIterator<Item = Anchor>) -> Self {
        Self {
            elements: anchors
                .into_iter()
                .map(|anchor| (anchor, ElementState::default()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn listing() -> Self {
        Self::with_anchors(Anchor::LISTING)
    }

    pub fn detail() -> Self {
        Self::with_anchors(Anchor::DETAIL)
    }

    pub fn element(&self, anchor: Anchor) -> Option<&ElementState> {
        self.elements.get(&anchor)
    }

    pub fn is_visible(&self, anchor: Anchor) -> bool {
        self.element(anchor).is_some_and(|element| element.visible)
    }

    pub fn text(&self, anchor: Anchor) -> Option<&str> {
        self.element(anchor)?.text.as_deref()
    }

    pub fn html(&self, anchor: Anchor) -> Option<&str> {
        self.element(anchor)?.html.as_deref()
    }

    pub fn attribute(&self, anchor: Anchor, name: &str) -> Option<&str> {
        self.element(anchor)?.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, anchor: Anchor, class: &str) -> bool {
        self.element(anchor)
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    pub fn document_title(&self) -> Option<&str> {
        self.document_title.as_deref()
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }

    /// Число записей, дошедших до существующего якоря или заголовка документа.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    fn edit(&mut self, anchor: Anchor, apply: impl FnOnce(&mut ElementState)) {
        if let Some(element) = self.elements.get_mut(&anchor) {
            apply(element);
            self.mutations += 1;
        }
    }
}

impl PageSurface for StaticPage {
    fn has_anchor(&self, anchor: Anchor) -> bool {
        self.elements.contains_key(&anchor)
    }

    fn set_visible(&mut self, anchor: Anchor, visible: bool) {
        self.edit(anchor, |element| element.visible = visible);
    }

    fn set_text(&mut self, anchor: Anchor, text: &str) {
        self.edit(anchor, |element| {
            element.text = Some(text.to_string());
            element.html = None;
        });
    }

    fn set_html(&mut self, anchor: Anchor, html: &str) {
        self.edit(anchor, |element| {
            element.html = Some(html.to_string());
            element.text = None;
        });
    }

    fn set_attribute(&mut self, anchor: Anchor, name: &str, value: &str) {
        self.edit(anchor, |element| {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        });
    }

    fn add_class(&mut self, anchor: Anchor, class: &str) {
        self.edit(anchor, |element| {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        });
    }

    fn set_document_title(&mut self, title: &str) {
        self.document_title = Some(title.to_string());
        self.mutations += 1;
    }

    fn set_meta_description(&mut self, description: &str) {
        self.meta_description = Some(description.to_string());
        self.mutations += 1;
    }
}
