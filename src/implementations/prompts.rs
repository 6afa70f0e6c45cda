use crate::models::common::CapabilityId;

/// Wraps every model call; placeholders are filled by the capability
pub const DEFAULT_CAPABILITY_TEMPLATE: &str =
    r#"
{{instructions}}

{{schema}}

Input:
{{input}}
"#;

/// Role given to the model as its system message
pub fn system_role(id: CapabilityId) -> &'static str {
    match id {
        | CapabilityId::ProblemAnalyzer
        | CapabilityId::BruteForceApproach
        | CapabilityId::BruteForceCoder =>
            "You are an expert in data structures and algorithms who explains brute-force solutions to beginners.",
        | CapabilityId::SubOptimalApproach
        | CapabilityId::SubOptimalCoder
        | CapabilityId::OptimalApproach
        | CapabilityId::OptimalCoder => "You are an algorithm optimization specialist.",
        CapabilityId::CodeRunner =>
            "You are a careful code executor. You trace Python code against test cases and report exactly what it outputs.",
        CapabilityId::CodeVerifier =>
            "You are a code reviewer who turns test reports into a final, corrected program.",
        | CapabilityId::NotesExplainer
        | CapabilityId::NotesTracer
        | CapabilityId::NotesFinalizer => "You are a patient DSA mentor who writes clear study notes.",
    }
}

/// Default task description for each capability
pub fn instructions(id: CapabilityId) -> &'static str {
    match id {
        CapabilityId::ProblemAnalyzer =>
            "Combine the contributions into a single analysis of the problem: restate it, list its \
             constraints and example test cases (each example as one string with input and expected \
             output), and give the brute-force approach, its step-by-step algorithm, working Python \
             code and its time and space complexity.",
        CapabilityId::BruteForceApproach =>
            "Explain the most straightforward brute-force approach to the problem using only basic \
             loops and conditionals. No optimizations. Give the algorithm step by step and state \
             its time and space complexity.",
        CapabilityId::BruteForceCoder =>
            "Write clean, commented Python code implementing the brute-force approach to the problem. \
             Use only basic constructs.",
        CapabilityId::SubOptimalApproach =>
            "Given the brute-force solution, propose an approach that is strictly better than brute \
             force but not yet the best known solution. Describe the approach, the algorithm step by \
             step and its time and space complexity.",
        CapabilityId::SubOptimalCoder =>
            "Implement the proposed approach in Python. Keep the same function signature as the prior \
             code so the same test cases apply.",
        CapabilityId::OptimalApproach =>
            "Given the verified sub-optimal solution, propose the most efficient known approach. \
             Describe the approach, the algorithm step by step and its time and space complexity.",
        CapabilityId::OptimalCoder =>
            "Implement the optimal approach in Python. Keep the same function signature as the prior \
             code so the same test cases apply.",
        CapabilityId::CodeRunner =>
            "Run the code against every test case. For each case report the input, the expected \
             output, the actual output, and PASS or FAIL. Report any exception verbatim.",
        CapabilityId::CodeVerifier =>
            "Using the code and its test results, produce the final code. If any test failed or \
             raised, fix the bug. Report the final time and space complexity and the libraries the \
             code imports (or \"none\").",
        CapabilityId::NotesExplainer =>
            "Explain the given code as study notes: restate the problem it solves, summarize the \
             approach, break it down step by step, analyse time and space complexity, walk through \
             the code section by section, list edge cases and key concepts.",
        CapabilityId::NotesTracer =>
            "Pick a small, illustrative example input for the given code and trace its execution \
             step by step, showing variable states. Add an ASCII visual if it helps, the key \
             intermediate results, the final output, and briefly mention other test cases.",
        CapabilityId::NotesFinalizer =>
            "Rewrite these study notes as a single well-formatted Markdown document with headings, \
             code blocks and bullet lists. Keep all the content; do not add new analysis.",
    }
}
