use crate::errors::{ MentorError, MentorResult };

/// A built-in problem the user can start from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleProblem {
    pub title: &'static str,
    pub statement: &'static str,
}

impl ExampleProblem {
    /// Short menu label, cut to `width` characters
    pub fn label(&self, width: usize) -> String {
        if self.statement.chars().count() <= width {
            return self.statement.to_string();
        }
        let head: String = self.statement.chars().take(width).collect();
        format!("{}...", head.trim_end())
    }
}

pub const EXAMPLE_PROBLEMS: [ExampleProblem; 4] = [
    ExampleProblem {
        title: "Two Sum",
        statement: "Two Sum: Given an array of integers and a target sum, return indices of two numbers that add up to target.",
    },
    ExampleProblem {
        title: "Binary Search",
        statement: "Binary Search: Search for a target value in a sorted array.",
    },
    ExampleProblem {
        title: "Fibonacci",
        statement: "Fibonacci: Calculate the nth Fibonacci number.",
    },
    ExampleProblem {
        title: "House Robber",
        statement: "House Robber: Given an integer array nums representing the amount of money of each house, return the maximum amount of money you can rob tonight without alerting the police.",
    },
];

/// Look up an example by the 1-based number shown to the user
pub fn example_problem(number: usize) -> MentorResult<&'static ExampleProblem> {
    number
        .checked_sub(1)
        .and_then(|index| EXAMPLE_PROBLEMS.get(index))
        .ok_or_else(|| {
            MentorError::InvalidInput(
                format!("there is no example {}; choose 1 to {}", number, EXAMPLE_PROBLEMS.len())
            )
        })
}
