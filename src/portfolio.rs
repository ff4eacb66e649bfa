//! Static content of the desk: which windows exist, where they start and
//! what the text pages say.
use indoc::indoc;

use crate::constants::{
    ABOUT_WINDOW_ID, CONSOLE_WINDOW_ID, CONTACT_WINDOW_ID, DEBUG_WINDOW_ID, INTRO_WINDOW_ID,
    PROJECTS_WINDOW_ID, SKILLS_WINDOW_ID,
};
use crate::window::{WindowId, WindowSpec};

/// What a window draws inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContent {
    Text(&'static str),
    Console,
    DebugLog,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub id: &'static str,
    pub title: &'static str,
    pub taskbar_label: &'static str,
    pub width: u16,
    pub height: u16,
    pub content: PageContent,
}

const INTRO: &str = indoc! {"
    Hi, I'm Bhushan Talukdar.

    Jr. Product Designer based in Bengaluru, India.
    I design calm, useful interfaces and prototype
    them until they feel right.

    Drag windows by their title bar. Use the
    taskbar (or Alt+1..9) to open the other pages.
    Ctrl+Q quits.
"};

const ABOUT: &str = indoc! {"
    About me

    I'm a Jr. Product Designer from Bengaluru, India
    with 1.5 years of experience.

    I enjoy turning fuzzy problems into clear flows:
    research first, sketches second, pixels last.
    Outside work I collect old computers, which is
    where this desktop comes from.
"};

const SKILLS: &str = indoc! {"
    Skills

    ■ UI/UX Design
    ■ Prototyping
    ■ Wireframing
    ■ User Research
    ■ Interaction Design

    Tools: Figma, FigJam, Protopie, Notion
"};

const PROJECTS: &str = indoc! {"
    Projects

    1. Fintech onboarding redesign
       Cut sign-up drop-off by simplifying KYC into
       three short steps with inline validation.

    2. Community health app
       Field research with ASHA workers; offline-first
       flows for patient visits.

    3. Design system starter
       Tokens, components and usage docs for a small
       product team.

    4. This retro desk
       A portfolio you can drag around.
"};

const CONTACT: &str = indoc! {"
    Contact

    Email:    bhushan@example.com
    LinkedIn: /in/bhushan-talukdar

    Open to junior product design roles.
"};

pub const PAGES: [Page; 6] = [
    Page {
        id: INTRO_WINDOW_ID,
        title: "Welcome.txt",
        taskbar_label: "Welcome",
        width: 52,
        height: 13,
        content: PageContent::Text(INTRO),
    },
    Page {
        id: ABOUT_WINDOW_ID,
        title: "About Me",
        taskbar_label: "About",
        width: 54,
        height: 13,
        content: PageContent::Text(ABOUT),
    },
    Page {
        id: SKILLS_WINDOW_ID,
        title: "Skills",
        taskbar_label: "Skills",
        width: 44,
        height: 13,
        content: PageContent::Text(SKILLS),
    },
    Page {
        id: PROJECTS_WINDOW_ID,
        title: "My Projects",
        taskbar_label: "Projects",
        width: 56,
        height: 18,
        content: PageContent::Text(PROJECTS),
    },
    Page {
        id: CONTACT_WINDOW_ID,
        title: "Contact",
        taskbar_label: "Contact",
        width: 44,
        height: 10,
        content: PageContent::Text(CONTACT),
    },
    Page {
        id: CONSOLE_WINDOW_ID,
        title: "Terminal",
        taskbar_label: "Terminal",
        width: 64,
        height: 16,
        content: PageContent::Console,
    },
];

pub const DEBUG_PAGE: Page = Page {
    id: DEBUG_WINDOW_ID,
    title: "Debug Log",
    taskbar_label: "Debug",
    width: 72,
    height: 14,
    content: PageContent::DebugLog,
};

/// Pages on the desk; the debug log only when it is enabled.
pub fn pages(debug: bool) -> Vec<Page> {
    let mut pages = PAGES.to_vec();
    if debug {
        pages.push(DEBUG_PAGE);
    }
    pages
}

pub fn page(id: &str) -> Option<Page> {
    PAGES
        .iter()
        .chain(std::iter::once(&DEBUG_PAGE))
        .find(|page| page.id == id)
        .copied()
}

/// Window declarations. Every window starts hidden and is centered the
/// first time it is shown. Page sizes count as explicit, so a restore after
/// maximize returns to them.
pub fn window_specs(pages: &[Page]) -> Vec<WindowSpec> {
    pages
        .iter()
        .map(|page| {
            WindowSpec::new(page.id, page.title, page.width, page.height).with_explicit_size()
        })
        .collect()
}

pub fn taskbar_entries(pages: &[Page]) -> Vec<(WindowId, &'static str)> {
    pages
        .iter()
        .map(|page| (WindowId::from(page.id), page.taskbar_label))
        .collect()
}
