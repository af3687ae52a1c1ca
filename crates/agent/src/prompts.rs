//! Prompt templates for the component agent.

/// Initial user turn for a creation run.
pub fn create_component(name: &str, prompt: &str) -> String {
    format!(
        "Create a React TypeScript component named '{name}' based on this description:\n\
         \n\
         {prompt}\n\
         \n\
         Requirements:\n\
         - Use TypeScript with proper type definitions\n\
         - Use Tailwind CSS for all styling\n\
         - Make it a functional component with export default\n\
         - Make it responsive and accessible\n\
         - Include any necessary props with TypeScript interfaces\n\
         - Use modern React patterns (hooks if needed)\n\
         \n\
         IMPORTANT: You must use the create_component tool to save the component. \
         Do not just describe the component - actually call the create_component tool \
         with the full component code."
    )
}

/// Initial user turn for an edit run; embeds the current artifact body.
pub fn edit_component(name: &str, instructions: &str, existing_code: &str) -> String {
    format!(
        "Please edit the React TypeScript component '{name}' based on this description:\n\
         \n\
         {instructions}\n\
         \n\
         Here is the current component code:\n\
         \n\
         ```tsx\n\
         {existing_code}\n\
         ```\n\
         \n\
         Requirements:\n\
         - Maintain TypeScript with proper type definitions\n\
         - Keep using Tailwind CSS for styling\n\
         - Keep it as a functional component with export default\n\
         - Preserve the core functionality while making the requested changes\n\
         - Use modern React patterns\n\
         \n\
         IMPORTANT: You must use the update_component tool to save the modified \
         component. Do not just describe the component - actually call the \
         update_component tool with the full component code."
    )
}

/// Corrective turn appended when the model ends its turn without having
/// persisted anything.
pub fn demand_tool_use(tool_name: &str) -> String {
    format!(
        "Please use the {tool_name} tool to save the component code. \
         Don't just describe it - actually call the tool with the component code."
    )
}

/// One-shot prompt for generating an event handler as a JSON object.
pub fn generate_interaction(component_name: &str, event_type: &str, description: &str) -> String {
    format!(
        r#"Generate a React event handler for the following interaction:

Component: {component_name}
Event Type: {event_type}
Description: {description}

Please generate:
1. A handler function name (e.g., handleButtonClick, handleInputChange)
2. The complete handler function code in TypeScript
3. Any state variables needed (using useState)

Requirements:
- Use TypeScript
- Follow React best practices
- Keep it simple and focused on the described behavior
- If state is needed, identify what state variables are required

Respond with a JSON object in this exact format:
{{
  "handlerName": "string (e.g., handleClick)",
  "code": "string (complete handler function code)",
  "state": [
    {{
      "name": "string (state variable name)",
      "type": "string (TypeScript type)",
      "initialValue": "any (initial value as JSON)"
    }}
  ]
}}

Example for "Show an alert when clicked":
{{
  "handlerName": "handleClick",
  "code": "const handleClick = () => {{\n  alert('Button clicked!');\n}}",
  "state": []
}}

Example for "Count button clicks":
{{
  "handlerName": "handleClick",
  "code": "const handleClick = () => {{\n  setClickCount(clickCount + 1);\n}}",
  "state": [
    {{
      "name": "clickCount",
      "type": "number",
      "initialValue": 0
    }}
  ]
}}

Only respond with the JSON object, no additional text."#
    )
}
