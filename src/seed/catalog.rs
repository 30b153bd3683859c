//! The fixed course catalog
//!
//! Course titles are the cross-environment join key and module ids are
//! referenced by progress records; both must stay stable when editing
//! content here. Content blocks hold markdown.

use crate::db::schemas::{ContentBlock, CourseDoc, Module};

/// Every course in seeding order
pub fn all_courses() -> Vec<CourseDoc> {
    vec![
        course_git(),
        course_solid(),
        course_scrum(),
        course_http(),
        course_design_patterns(),
        course_testing(),
        course_dev_tools(),
        course_code_concepts(),
    ]
}

fn module(id: &str, title: &str, content: Vec<ContentBlock>) -> Module {
    Module {
        id: id.into(),
        title: title.into(),
        content,
        video_url: None,
    }
}

fn text(text: &str) -> ContentBlock {
    ContentBlock::Text { text: text.into() }
}

fn code(language: &str, code: &str) -> ContentBlock {
    ContentBlock::Code {
        language: language.into(),
        code: code.into(),
    }
}

fn callout(style: &str, text: &str) -> ContentBlock {
    ContentBlock::Callout {
        style: style.into(),
        text: text.into(),
    }
}

fn exercise(prompt: &str, solution: &str, hints: &[&str]) -> ContentBlock {
    ContentBlock::Exercise {
        prompt: prompt.into(),
        solution: solution.into(),
        hints: hints.iter().map(|h| h.to_string()).collect(),
    }
}

fn course_git() -> CourseDoc {
    CourseDoc::new(
        "Git".into(),
        "Learn version control with Git - the essential tool for modern software \
         development. Master branching, merging, and collaboration workflows."
            .into(),
        vec![
            module(
                "git-1",
                "Introduction to Version Control",
                vec![
                    text(
                        "## What is Version Control?\n\nVersion control records changes to \
                         files over time so you can recall specific versions later, compare \
                         changes, and recover from mistakes.",
                    ),
                    callout(
                        "info",
                        "Git is distributed: every clone carries the complete history.",
                    ),
                ],
            ),
            module(
                "git-2",
                "Git Basics: Init, Add, Commit",
                vec![
                    text("Initialize a repository, stage changes, and commit them."),
                    code(
                        "bash",
                        "git init\ngit add README.md\ngit commit -m \"Initial commit\"",
                    ),
                ],
            ),
            module(
                "git-3",
                "Remote Repositories",
                vec![
                    text("Remotes connect your repository to shared copies."),
                    code(
                        "bash",
                        "git remote add origin git@example.com:team/app.git\ngit push -u origin main\ngit pull",
                    ),
                ],
            ),
            module(
                "git-4",
                "Branching and Merging",
                vec![
                    text(
                        "Branches let you develop features in isolation, then merge them \
                         back when they are ready.",
                    ),
                    code("bash", "git switch -c feature/login\ngit switch main\ngit merge feature/login"),
                    exercise(
                        "Create a branch named experiment and switch back to main.",
                        "git switch -c experiment\ngit switch main",
                        &["git switch -c creates and switches in one step"],
                    ),
                ],
            ),
            module(
                "git-5",
                "Collaboration Workflows",
                vec![text(
                    "Teams combine branches, pull requests, and reviews into a workflow. \
                     Trunk-based and git-flow are the two common shapes.",
                )],
            ),
            module(
                "git-6",
                "Resolving Conflicts",
                vec![
                    text(
                        "When both branches touch the same lines, Git stops the merge and \
                         marks the conflicting region for you to resolve.",
                    ),
                    code(
                        "text",
                        "<<<<<<< HEAD\nyour change\n=======\ntheir change\n>>>>>>> feature/login",
                    ),
                ],
            ),
            module(
                "git-7",
                "Advanced Git: Rebase, Cherry-pick, Stash",
                vec![
                    text(
                        "rebase replays commits onto a new base, cherry-pick copies a \
                         single commit, stash shelves uncommitted work.",
                    ),
                    callout("warning", "Never rebase commits that are already pushed and shared."),
                ],
            ),
        ],
    )
}

fn course_solid() -> CourseDoc {
    CourseDoc::new(
        "Architecture - SOLID".into(),
        "Master the SOLID principles of object-oriented design to write maintainable, \
         scalable, and robust software architectures."
            .into(),
        vec![
            module(
                "solid-1",
                "Introduction to SOLID Principles",
                vec![text(
                    "SOLID is five design principles that keep object-oriented code \
                     flexible under change. Each letter is one principle.",
                )],
            ),
            module(
                "solid-2",
                "Single Responsibility Principle (SRP)",
                vec![text(
                    "A class should have one reason to change. Split modules along the \
                     axes of change, not along data shapes.",
                )],
            ),
            module(
                "solid-3",
                "Open/Closed Principle (OCP)",
                vec![
                    text("Extend behavior without modifying existing code."),
                    code(
                        "typescript",
                        "interface Shape {\n  area(): number;\n}\n\nclass Circle implements Shape {\n  constructor(private r: number) {}\n  area() { return Math.PI * this.r ** 2; }\n}",
                    ),
                ],
            ),
            module(
                "solid-4",
                "Liskov Substitution Principle (LSP)",
                vec![text(
                    "Subtypes must be substitutable for their base types without \
                     surprising the caller.",
                )],
            ),
            module(
                "solid-5",
                "Interface Segregation Principle (ISP)",
                vec![text(
                    "Prefer several small interfaces to one wide one; clients should \
                     not depend on methods they never call.",
                )],
            ),
            module(
                "solid-6",
                "Dependency Inversion Principle (DIP)",
                vec![text(
                    "Depend on abstractions rather than concretions; high-level policy \
                     should not import low-level detail.",
                )],
            ),
            module(
                "solid-7",
                "Applying SOLID in Practice",
                vec![exercise(
                    "Pick a class you wrote recently and name which SOLID principle it \
                     bends the most.",
                    "Most often SRP: classes accumulate responsibilities over time and \
                     need splitting along their change axes.",
                    &["Look at the reasons the class changed in the last few commits"],
                )],
            ),
        ],
    )
}

fn course_scrum() -> CourseDoc {
    CourseDoc::new(
        "SCRUM".into(),
        "Learn the SCRUM framework for agile project management. Understand sprints, \
         standups, and how to deliver value iteratively."
            .into(),
        vec![
            module(
                "scrum-1",
                "Introduction to Agile & SCRUM",
                vec![text(
                    "SCRUM delivers work in fixed-length sprints with a defined backlog, \
                     a daily sync, and a review at the end.",
                )],
            ),
            module(
                "scrum-2",
                "SCRUM Roles (Product Owner, Scrum Master, Team)",
                vec![text(
                    "The product owner orders the backlog, the scrum master guards the \
                     process, the team builds the increment.",
                )],
            ),
            module(
                "scrum-3",
                "SCRUM Events (Sprint, Daily Standup, Retrospective)",
                vec![text(
                    "Each event has a fixed timebox. The standup answers three \
                     questions: what was done, what is next, what is blocking.",
                )],
            ),
            module(
                "scrum-4",
                "SCRUM Artifacts (Product Backlog, Sprint Backlog, Increment)",
                vec![text(
                    "The product backlog holds everything that might be built, the \
                     sprint backlog what the team committed to, the increment what \
                     actually shipped.",
                )],
            ),
            module(
                "scrum-5",
                "Sprint Planning",
                vec![text(
                    "Planning turns backlog items into a sprint goal and a forecast \
                     the team believes in.",
                )],
            ),
            module(
                "scrum-6",
                "User Stories & Estimation",
                vec![
                    text("As a <role>, I want <capability>, so that <benefit>."),
                    callout("info", "Velocity is a planning signal, not a performance metric."),
                ],
            ),
            module(
                "scrum-7",
                "Running Effective Sprints",
                vec![exercise(
                    "Your team finished 60% of the sprint backlog two sprints in a row. \
                     What do you change?",
                    "Reduce the forecast to match observed velocity and inspect what \
                     interrupts the sprint in the retrospective.",
                    &[],
                )],
            ),
        ],
    )
}

fn course_http() -> CourseDoc {
    CourseDoc::new(
        "HTTP Networking".into(),
        "Deep dive into HTTP protocols, REST APIs, request/response cycles, and modern \
         web communication patterns."
            .into(),
        vec![
            module(
                "http-1",
                "HTTP Fundamentals",
                vec![
                    text("Every HTTP exchange is a method, a path, headers, and a body."),
                    code(
                        "http",
                        "GET /api/courses HTTP/1.1\nHost: example.com\nAccept: application/json",
                    ),
                ],
            ),
            module(
                "http-2",
                "HTTP Methods (GET, POST, PUT, DELETE, etc.)",
                vec![text(
                    "GET reads, POST creates, PUT replaces, PATCH updates in place, \
                     DELETE removes. GET and PUT should be safe to retry.",
                )],
            ),
            module(
                "http-3",
                "HTTP Status Codes",
                vec![text(
                    "2xx success, 3xx redirection, 4xx client errors, 5xx server \
                     errors. Use 404 for missing resources and 409 for conflicts.",
                )],
            ),
            module(
                "http-4",
                "Headers & Cookies",
                vec![
                    text("Headers carry metadata; cookies carry state across requests."),
                    code("http", "Set-Cookie: session=abc123; HttpOnly; Secure; SameSite=Lax"),
                ],
            ),
            module(
                "http-5",
                "REST API Design",
                vec![text(
                    "Resources are nouns, methods are verbs. /api/courses/42 is a \
                     resource; /api/getCourse?id=42 is a remote procedure call wearing \
                     a URL.",
                )],
            ),
            module(
                "http-6",
                "Request/Response Cycle",
                vec![text(
                    "DNS resolution, TCP connection, TLS handshake, request, response, \
                     render. Each step is a place latency hides.",
                )],
            ),
            module(
                "http-7",
                "HTTPS & Security",
                vec![
                    text("TLS gives confidentiality and integrity; certificates give identity."),
                    callout("warning", "Never send credentials over plain HTTP."),
                ],
            ),
        ],
    )
}

fn course_design_patterns() -> CourseDoc {
    CourseDoc::new(
        "Design Patterns".into(),
        "Learn proven software design patterns to solve common programming challenges \
         elegantly and efficiently."
            .into(),
        vec![
            module(
                "patterns-1",
                "Introduction to Design Patterns",
                vec![text(
                    "Patterns are named, recurring solutions to design problems. The \
                     name is half the value: it compresses a design conversation.",
                )],
            ),
            module(
                "patterns-2",
                "Creational Patterns (Singleton, Factory)",
                vec![text(
                    "Factories and builders separate how objects are constructed from \
                     where they are used.",
                )],
            ),
            module(
                "patterns-3",
                "Structural Patterns (Adapter, Decorator)",
                vec![text(
                    "Adapters, decorators, and facades reshape interfaces without \
                     rewriting the underlying code.",
                )],
            ),
            module(
                "patterns-4",
                "Behavioral Patterns (Observer, Strategy)",
                vec![text(
                    "Observers, strategies, and commands model how objects communicate \
                     and vary behavior at runtime.",
                )],
            ),
            module(
                "patterns-5",
                "MVC Pattern",
                vec![text(
                    "Model holds state, view renders it, controller translates input \
                     into model changes.",
                )],
            ),
            module(
                "patterns-6",
                "Repository Pattern",
                vec![text(
                    "A repository puts an interface between domain logic and storage, \
                     so the store can be swapped and tests can run in memory.",
                )],
            ),
            module(
                "patterns-7",
                "Choosing the Right Pattern",
                vec![exercise(
                    "You need to notify several independent components when an order \
                     ships. Which pattern fits?",
                    "Observer: the order emits an event, listeners subscribe without \
                     the order knowing them.",
                    &["Think about which side should know about the other"],
                )],
            ),
        ],
    )
}

fn course_testing() -> CourseDoc {
    CourseDoc::new(
        "Testing".into(),
        "Master software testing strategies including unit tests, integration tests, \
         and test-driven development (TDD)."
            .into(),
        vec![
            module(
                "testing-1",
                "Testing Fundamentals",
                vec![text(
                    "Tests document behavior and catch regressions before users do. \
                     Many fast unit tests, fewer integration tests, a handful of \
                     end-to-end checks.",
                )],
            ),
            module(
                "testing-2",
                "Unit Testing",
                vec![
                    text("A unit test exercises one piece of logic in isolation."),
                    code(
                        "typescript",
                        "test('percent of empty course is zero', () => {\n  expect(percent(0, 0)).toBe(0);\n});",
                    ),
                ],
            ),
            module(
                "testing-3",
                "Integration Testing",
                vec![text(
                    "Integration tests exercise components together, usually against \
                     real or realistic collaborators like an in-memory database.",
                )],
            ),
            module(
                "testing-4",
                "Test-Driven Development (TDD)",
                vec![text(
                    "Red, green, refactor: write the failing test first, make it pass \
                     with the simplest code, then clean up.",
                )],
            ),
            module(
                "testing-5",
                "Mocking & Stubbing",
                vec![
                    text("Stubs return canned data; mocks verify interactions."),
                    exercise(
                        "When would you prefer a fake over a mock?",
                        "When realistic behavior matters more than verifying specific \
                         calls, e.g. an in-memory repository.",
                        &["Think about state vs. interaction testing"],
                    ),
                ],
            ),
            module(
                "testing-6",
                "Testing Best Practices",
                vec![text(
                    "Name tests after the behavior they verify, keep each test to one \
                     reason to fail, and never assert on incidental details.",
                )],
            ),
            module(
                "testing-7",
                "Continuous Testing",
                vec![text(
                    "Run the suite on every push. A test that only runs on release \
                     night protects nothing.",
                )],
            ),
        ],
    )
}

fn course_dev_tools() -> CourseDoc {
    CourseDoc::new(
        "Development Tools".into(),
        "Set up your development environment with the essential tools every developer \
         needs."
            .into(),
        vec![module(
            "vscode-setup",
            "VS Code Setup",
            vec![
                text(
                    "Install VS Code, add the extensions for your language, and learn \
                     the command palette before anything else.",
                ),
                code("bash", "code --install-extension rust-lang.rust-analyzer"),
                callout("info", "The integrated terminal keeps edit and run in one window."),
            ],
        )],
    )
}

fn course_code_concepts() -> CourseDoc {
    CourseDoc::new(
        "Code Concepts".into(),
        "Fundamental programming paradigms and concepts that every developer should \
         master."
            .into(),
        vec![
            module(
                "code-1",
                "Object Oriented Programming",
                vec![text(
                    "Objects bundle state with the behavior that guards it. \
                     Encapsulation, inheritance, and polymorphism are the classic \
                     three pillars.",
                )],
            ),
            module(
                "code-2",
                "Functional Programming",
                vec![text(
                    "Pure functions and immutable data make behavior predictable: the \
                     same inputs always produce the same outputs.",
                )],
            ),
            module(
                "code-3",
                "Protocol Oriented Programming",
                vec![text(
                    "Define capabilities as protocols (interfaces, traits) and compose \
                     them, instead of building deep class hierarchies.",
                )],
            ),
            module(
                "code-4",
                "Functions & Closures",
                vec![
                    text("A closure is a function that captures variables from its scope."),
                    code(
                        "javascript",
                        "function counter() {\n  let n = 0;\n  return () => ++n;\n}",
                    ),
                ],
            ),
            module(
                "code-5",
                "Programming Languages 101 (C#, JavaScript, TypeScript, Go, Python)",
                vec![text(
                    "Languages differ in typing discipline, runtime model, and \
                     ecosystem. Pick by the problem and the team, not by fashion.",
                )],
            ),
            module(
                "code-6",
                "Control Flow (How Programs Make Decisions)",
                vec![text(
                    "Conditionals, loops, and early returns are how programs choose a \
                     path. Flat control flow reads best.",
                )],
            ),
        ],
    )
}
