use super::escape;

#[derive(Debug, Clone)]
pub(crate) struct SidebarLink {
    pub(crate) label: &'static str,
    pub(crate) href: &'static str,
}

#[derive(Debug, Clone)]
pub(crate) struct SidebarSection {
    pub(crate) heading: &'static str,
    pub(crate) links: Vec<SidebarLink>,
}

/// Navigation shared by every controller.
#[derive(Debug, Clone)]
pub(crate) struct Sidebar {
    pub(crate) sections: Vec<SidebarSection>,
}

impl Sidebar {
    pub(crate) fn standard() -> Self {
        Self {
            sections: vec![
                SidebarSection {
                    heading: "Systems",
                    links: vec![SidebarLink {
                        label: "All Systems",
                        href: "/systems",
                    }],
                },
                SidebarSection {
                    heading: "Statistics",
                    links: vec![
                        SidebarLink {
                            label: "Get Started",
                            href: "/statistics",
                        },
                        SidebarLink {
                            label: "OS Distribution",
                            href: "/statistics/os_distribution",
                        },
                        SidebarLink {
                            label: "OS Family Distribution",
                            href: "/statistics/os_family_distribution",
                        },
                    ],
                },
            ],
        }
    }
}

/// Page heading with optional create/edit actions.
#[derive(Debug, Clone)]
pub(crate) struct Navbar {
    pub(crate) title: String,
    pub(crate) create: Option<String>,
    pub(crate) edit: Option<String>,
}

impl Navbar {
    pub(crate) fn new(
        title: impl Into<String>,
        create: Option<String>,
        edit: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            create,
            edit,
        }
    }
}

/// Everything a controller hands to the main layout.
#[derive(Debug, Clone)]
pub(crate) struct Page {
    pub(crate) title: String,
    pub(crate) navbar: Navbar,
    pub(crate) data: String,
}

pub(crate) fn header(title: &str, skin: &str) -> String {
    format!(
        "<head>\n<meta charset=\"utf-8\">\n<title>{title} | Impulse</title>\n\
         <link rel=\"stylesheet\" href=\"/css/{skin}/full/main.css\">\n</head>\n",
        title = escape(title),
        skin = escape(skin),
    )
}

pub(crate) fn sidebar(sidebar: &Sidebar) -> String {
    let mut out = String::from("<nav class=\"sidebar\">\n");
    for section in &sidebar.sections {
        out.push_str(&format!(
            "<h3>{}</h3>\n<ul>\n",
            escape(section.heading)
        ));
        for link in &section.links {
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape(link.href),
                escape(link.label)
            ));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</nav>\n");
    out
}

pub(crate) fn navbar(navbar: &Navbar) -> String {
    let mut out = format!(
        "<div class=\"navbar\">\n<h1>{}</h1>\n",
        escape(&navbar.title)
    );
    if let Some(href) = &navbar.create {
        out.push_str(&format!(
            "<a class=\"action create\" href=\"{}\">Create</a>\n",
            escape(href)
        ));
    }
    if let Some(href) = &navbar.edit {
        out.push_str(&format!(
            "<a class=\"action edit\" href=\"{}\">Edit</a>\n",
            escape(href)
        ));
    }
    out.push_str("</div>\n");
    out
}

/// The main layout: header, sidebar, navbar and the controller's data view.
pub(crate) fn main_layout(page: &Page, sidebar_model: &Sidebar, skin: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n{header}<body>\n{sidebar}<main>\n{navbar}\
         <section class=\"data\">\n{data}</section>\n</main>\n</body>\n</html>\n",
        header = header(&page.title, skin),
        sidebar = sidebar(sidebar_model),
        navbar = navbar(&page.navbar),
        data = page.data,
    )
}
